use crate::api::error::ApiError;
use crate::api::response::engagement::EngagementStatusResponse;
use crate::api::current_user;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use application::command::dual_write::DualWriteCoordinator;
use application::command::engagement::{
    AddFavoritePlaceCmd, AddFavoriteUserCmd, AddLikeCmd, EngagementService,
    RemoveFavoritePlaceCmd, RemoveFavoriteUserCmd, RemoveLikeCmd,
};
use application::context::AppContext;
use application::query::get_engagement_status::get_engagement_status;
use domain::engagement::RelationStore;
use domain::value::{PlaceId, ProfileId};
use infra::event_bus::in_memory::InMemoryEventBus;
use infra::repository::postgres::command::relation_store::SeaOrmRelationStore;
use infra::repository::postgres::query::engagement_dao::EngagementDaoImpl;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// 互动请求体：前端把自己最近一次读到的计数值带上来
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub current: i32,
}

/// 每个请求构建一次互动服务，补偿策略来自配置
fn engagement_service(state: &AppState) -> EngagementService<InMemoryEventBus> {
    let relation_store: Arc<dyn RelationStore> =
        Arc::new(SeaOrmRelationStore::new(state.db.clone()));
    let compensation = state.app_cfg.compensation();
    let coordinator = DualWriteCoordinator::new(relation_store, Arc::new(state.event_bus.clone()))
        .with_compensation_policy(
            compensation.attempts,
            Duration::from_millis(compensation.backoff_ms),
        );
    EngagementService::with_coordinator(coordinator)
}

pub async fn like_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CounterSnapshot>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = engagement_service(&state);
    let ctx = AppContext::new();
    svc.add_like(
        &ctx,
        ProfileId::from(user.user_id),
        AddLikeCmd {
            place_id: PlaceId::from(path.into_inner()),
            current_likes: body.current,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn unlike_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CounterSnapshot>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = engagement_service(&state);
    let ctx = AppContext::new();
    svc.remove_like(
        &ctx,
        ProfileId::from(user.user_id),
        RemoveLikeCmd {
            place_id: PlaceId::from(path.into_inner()),
            current_likes: body.current,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn favorite_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CounterSnapshot>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = engagement_service(&state);
    let ctx = AppContext::new();
    svc.add_favorite_place(
        &ctx,
        ProfileId::from(user.user_id),
        AddFavoritePlaceCmd {
            place_id: PlaceId::from(path.into_inner()),
            current_favorites: body.current,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn unfavorite_place(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CounterSnapshot>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = engagement_service(&state);
    let ctx = AppContext::new();
    svc.remove_favorite_place(
        &ctx,
        ProfileId::from(user.user_id),
        RemoveFavoritePlaceCmd {
            place_id: PlaceId::from(path.into_inner()),
            current_favorites: body.current,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn favorite_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CounterSnapshot>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let target = path.into_inner();
    if target == user.user_id {
        return Err(ApiError::BadRequest("不能收藏自己".to_string()));
    }
    let svc = engagement_service(&state);
    let ctx = AppContext::new();
    svc.add_favorite_user(
        &ctx,
        ProfileId::from(user.user_id),
        AddFavoriteUserCmd {
            user_id: ProfileId::from(target),
            current_favorites: body.current,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn unfavorite_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CounterSnapshot>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let svc = engagement_service(&state);
    let ctx = AppContext::new();
    svc.remove_favorite_user(
        &ctx,
        ProfileId::from(user.user_id),
        RemoveFavoriteUserCmd {
            user_id: ProfileId::from(path.into_inner()),
            current_favorites: body.current,
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 推荐详情页打开时查询互动状态
pub async fn place_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<web::Json<EngagementStatusResponse>, ApiError> {
    let user = current_user(&req)?;
    let dao = Arc::new(EngagementDaoImpl::new(state.db.clone()));
    let status = get_engagement_status(dao, user.user_id, path.into_inner()).await?;
    Ok(web::Json(status.into()))
}
