use crate::error::AppError;
use crate::event::event_bus::{EventBus, EventEnvelope, Handler};
use async_trait::async_trait;
use chrono::Utc;
use domain::engagement::{
    EngagementEvent, ParentKind, RelationKind, RelationRow, RelationStore, StoreError,
};
use domain::value::{ProfileId, RelationId};
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// 可注入故障的关系存储替身。
/// 行为与生产实现保持一致：(owner, target) 上有唯一约束。
pub(crate) struct StubRelationStore {
    next_id: AtomicI64,
    rows: Mutex<Vec<(RelationKind, i64, i64)>>,
    counters: Mutex<HashMap<(ParentKind, &'static str, i64), i32>>,
    /// 注入：关系插入全部失败
    pub fail_insert: AtomicBool,
    /// 注入：关系删除全部失败
    pub fail_delete: AtomicBool,
    /// 注入：前 N 次计数写入成功，之后全部失败（i64::MAX 表示不限）
    pub allow_updates: AtomicI64,
    pub insert_calls: AtomicU32,
    pub delete_calls: AtomicU32,
    pub update_calls: AtomicU32,
}

impl StubRelationStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: Mutex::new(Vec::new()),
            counters: Mutex::new(HashMap::new()),
            fail_insert: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            allow_updates: AtomicI64::new(i64::MAX),
            insert_calls: AtomicU32::new(0),
            delete_calls: AtomicU32::new(0),
            update_calls: AtomicU32::new(0),
        }
    }

    fn counter_key(kind: RelationKind, target_id: i64) -> (ParentKind, &'static str, i64) {
        (kind.parent(), kind.counter_column(), target_id)
    }

    pub fn seed_counter(&self, kind: RelationKind, target_id: i64, value: i32) {
        self.counters
            .lock()
            .unwrap()
            .insert(Self::counter_key(kind, target_id), value);
    }

    pub fn counter(&self, kind: RelationKind, target_id: i64) -> Option<i32> {
        self.counters
            .lock()
            .unwrap()
            .get(&Self::counter_key(kind, target_id))
            .copied()
    }

    pub fn row_count(&self, kind: RelationKind, target_id: i64) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _, t)| *k == kind && *t == target_id)
            .count()
    }
}

#[async_trait]
impl RelationStore for StubRelationStore {
    async fn insert_relation_row(
        &self,
        kind: RelationKind,
        owner_id: ProfileId,
        target_id: i64,
    ) -> Result<RelationRow, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Db("injected insert failure".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let owner = owner_id.as_i64();
        if rows
            .iter()
            .any(|(k, o, t)| *k == kind && *o == owner && *t == target_id)
        {
            return Err(StoreError::Conflict(format!(
                "duplicate ({}, {}) in {}",
                owner, target_id, kind
            )));
        }
        rows.push((kind, owner, target_id));
        Ok(RelationRow {
            id: RelationId::from(self.next_id.fetch_add(1, Ordering::SeqCst)),
            kind,
            owner_id,
            target_id,
            created_at: Utc::now().naive_utc(),
        })
    }

    async fn delete_relation_row(
        &self,
        kind: RelationKind,
        owner_id: ProfileId,
        target_id: i64,
    ) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Db("injected delete failure".to_string()));
        }
        let owner = owner_id.as_i64();
        self.rows
            .lock()
            .unwrap()
            .retain(|(k, o, t)| !(*k == kind && *o == owner && *t == target_id));
        Ok(())
    }

    async fn update_counter(
        &self,
        kind: RelationKind,
        target_id: i64,
        new_value: i32,
    ) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.allow_updates.fetch_sub(1, Ordering::SeqCst) <= 0 {
            return Err(StoreError::Db("injected counter failure".to_string()));
        }
        self.counters
            .lock()
            .unwrap()
            .insert(Self::counter_key(kind, target_id), new_value);
        Ok(())
    }

    async fn count_relation_rows(
        &self,
        kind: RelationKind,
        target_id: i64,
    ) -> Result<i64, StoreError> {
        Ok(self.row_count(kind, target_id) as i64)
    }

    async fn read_counter(
        &self,
        kind: RelationKind,
        target_id: i64,
    ) -> Result<Option<i32>, StoreError> {
        Ok(self.counter(kind, target_id))
    }
}

/// 丢弃一切事件的总线
pub(crate) struct NullEventBus;

#[async_trait]
impl EventBus for NullEventBus {
    async fn publish<E>(&self, _event: EventEnvelope<E>) -> Result<(), AppError>
    where
        E: Send + Sync + 'static,
    {
        Ok(())
    }

    async fn subscribe<E>(&mut self, _handler: Arc<dyn Handler<E>>)
    where
        E: Send + Sync + 'static,
    {
    }
}

/// 记录发布的互动事件，供断言漂移上报
pub(crate) struct CapturingEventBus {
    pub engagement_events: Mutex<Vec<EngagementEvent>>,
}

impl CapturingEventBus {
    pub fn new() -> Self {
        Self {
            engagement_events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EventBus for CapturingEventBus {
    async fn publish<E>(&self, event: EventEnvelope<E>) -> Result<(), AppError>
    where
        E: Send + Sync + 'static,
    {
        if let Some(evt) = (&event.payload as &dyn Any).downcast_ref::<EngagementEvent>() {
            self.engagement_events.lock().unwrap().push(evt.clone());
        }
        Ok(())
    }

    async fn subscribe<E>(&mut self, _handler: Arc<dyn Handler<E>>)
    where
        E: Send + Sync + 'static,
    {
    }
}
