pub mod api;
pub mod middleware;

use application::command::shared::IdGenerator;
use application::event::event_bus::EventBus;
use application::event::handler::counter_reconciler::CounterReconciler;
use domain::engagement::{EngagementEvent, RelationStore};
use infra::config::AppConfigImpl;
use infra::event_bus::in_memory::InMemoryEventBus;
use infra::id_generator::SnowflakeIdGenerator;
use infra::repository::postgres::command::relation_store::SeaOrmRelationStore;
use sea_orm::DatabaseConnection;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbBackend, Statement};
use std::sync::Arc;

pub struct AppState {
    pub app_cfg: AppConfigImpl,
    pub db: DatabaseConnection,
    pub id_generator: Arc<dyn IdGenerator>,
    pub event_bus: InMemoryEventBus,
}

impl AppState {
    pub async fn init_db(db_url: &str) -> DatabaseConnection {
        use log::info;
        use std::time::Duration;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(90)
            .min_connections(20)
            .connect_timeout(Duration::from_secs(3))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(300))
            .sqlx_logging(false)
            .sqlx_logging_level(log::LevelFilter::Info);

        let db = Database::connect(opt)
            .await
            .expect("Failed to connect to database");

        let backend = DbBackend::Postgres;
        db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
            .await
            .expect("Failed to execute test query");

        info!("Database connection pool initialized successfully");
        db
    }

    pub async fn new(db: DatabaseConnection, app_cfg: AppConfigImpl) -> Self {
        let id_generator: Arc<dyn IdGenerator> = Arc::new(SnowflakeIdGenerator::new(1).unwrap());
        // 漂移事件的处理不阻塞发布方，用异步触发的总线
        let event_bus = InMemoryEventBus::new_async();

        Self {
            app_cfg,
            db,
            id_generator,
            event_bus,
        }
    }
}

/// 注册事件处理器：计数器漂移 -> 对账
pub async fn setup_event_bus(state: &mut AppState) {
    let relation_store: Arc<dyn RelationStore> =
        Arc::new(SeaOrmRelationStore::new(state.db.clone()));
    let reconciler = Arc::new(CounterReconciler::new(relation_store));
    state
        .event_bus
        .subscribe::<EngagementEvent>(reconciler)
        .await;
}
