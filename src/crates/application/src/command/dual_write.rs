use crate::context::AppContext;
use crate::event::event_bus::{EventBus, EventEnvelope};
use domain::engagement::{
    EngagementError, EngagementEvent, RelationKind, RelationStore, StoreError,
};
use domain::event::DomainEvent;
use domain::value::ProfileId;
use log::{error, warn};
use std::sync::Arc;
use std::time::Duration;

/// 关系写入方向：正向写入是插入还是删除
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationDirection {
    /// 插入关系行（点赞/收藏）
    Attach,
    /// 删除关系行（取消点赞/取消收藏）
    Detach,
}

impl RelationDirection {
    /// 语义逆操作：插入的逆是删除，删除的逆是重新插入
    pub fn invert(&self) -> Self {
        match self {
            RelationDirection::Attach => RelationDirection::Detach,
            RelationDirection::Detach => RelationDirection::Attach,
        }
    }
}

/// 一次双写的完整描述：正向的两个写入，以及补偿所需的旧计数值
#[derive(Debug, Clone)]
pub struct DualWritePlan {
    pub kind: RelationKind,
    pub owner_id: ProfileId,
    pub target_id: i64,
    pub direction: RelationDirection,
    /// 调用方最近一次读到的计数值，计数侧补偿时回写
    pub counter_before: i32,
    /// 正向写入要落库的新计数值
    pub counter_after: i32,
}

/// 双写结果描述：两个前向写入各自的结果
#[derive(Debug, Default)]
pub struct DualWriteReport {
    pub relation_error: Option<StoreError>,
    pub counter_error: Option<StoreError>,
}

impl DualWriteReport {
    pub fn is_clean(&self) -> bool {
        self.relation_error.is_none() && self.counter_error.is_none()
    }

    /// 返回给调用方的主错误：关系写入错误优先
    pub fn primary_error(self) -> Option<EngagementError> {
        if let Some(e) = self.relation_error {
            return Some(EngagementError::RelationWrite(e));
        }
        if let Some(e) = self.counter_error {
            return Some(EngagementError::CounterWrite(e));
        }
        None
    }
}

/// 双写协调器：把「关系行变更 + 计数列变更」这两个独立写入
/// 当作一次逻辑状态迁移来执行。
///
/// 两个前向写入同时发起、全部等待（不会因一侧先失败而放弃另一侧，
/// 补偿依赖于知道哪一侧真正写成功了）。恰好一侧失败时，
/// 对成功的一侧发出语义逆写入；两侧都失败时状态本来就没变，
/// 不做任何补偿，只把错误上报。
///
/// 补偿本身会带退避重试；重试耗尽后计数器进入漂移状态，
/// 此时记录错误日志并发布 CounterDrift 事件交给对账处理器，
/// 绝不静默吞掉。
pub struct DualWriteCoordinator<B: EventBus> {
    relation_store: Arc<dyn RelationStore>,
    event_bus: Arc<B>,
    compensation_attempts: u32,
    compensation_backoff: Duration,
}

/// 补偿的目标侧：回滚哪一个已成功的前向写入
#[derive(Debug, Clone, Copy)]
enum CompensationSide {
    Relation,
    Counter,
}

impl<B: EventBus> DualWriteCoordinator<B> {
    pub fn new(relation_store: Arc<dyn RelationStore>, event_bus: Arc<B>) -> Self {
        Self {
            relation_store,
            event_bus,
            compensation_attempts: 3,
            compensation_backoff: Duration::from_millis(50),
        }
    }

    pub fn with_compensation_policy(mut self, attempts: u32, backoff: Duration) -> Self {
        self.compensation_attempts = attempts.max(1);
        self.compensation_backoff = backoff;
        self
    }

    /// 执行一次双写，返回两个前向写入各自的结果
    pub async fn perform(&self, ctx: &AppContext, plan: &DualWritePlan) -> DualWriteReport {
        let relation_fut = self.apply_relation(plan, plan.direction);
        let counter_fut =
            self.relation_store
                .update_counter(plan.kind, plan.target_id, plan.counter_after);
        // 同时发起，全部等待
        let (relation_res, counter_res) = futures::join!(relation_fut, counter_fut);

        match (&relation_res, &counter_res) {
            (Ok(()), Ok(())) => {}
            (Err(_), Err(_)) => {
                // 两侧都没写成功，状态未变，不补偿
            }
            (Err(_), Ok(())) => {
                // 关系没写进去，计数器回写旧值
                self.compensate(ctx, plan, CompensationSide::Counter).await;
            }
            (Ok(()), Err(_)) => {
                // 计数器没写进去，撤销刚才的关系变更
                self.compensate(ctx, plan, CompensationSide::Relation).await;
            }
        }

        DualWriteReport {
            relation_error: relation_res.err(),
            counter_error: counter_res.err(),
        }
    }

    async fn apply_relation(
        &self,
        plan: &DualWritePlan,
        direction: RelationDirection,
    ) -> Result<(), StoreError> {
        match direction {
            RelationDirection::Attach => self
                .relation_store
                .insert_relation_row(plan.kind, plan.owner_id.clone(), plan.target_id)
                .await
                .map(|_| ()),
            RelationDirection::Detach => {
                self.relation_store
                    .delete_relation_row(plan.kind, plan.owner_id.clone(), plan.target_id)
                    .await
            }
        }
    }

    async fn compensate(&self, ctx: &AppContext, plan: &DualWritePlan, side: CompensationSide) {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let result = match side {
                CompensationSide::Counter => {
                    self.relation_store
                        .update_counter(plan.kind, plan.target_id, plan.counter_before)
                        .await
                }
                CompensationSide::Relation => {
                    self.apply_relation(plan, plan.direction.invert()).await
                }
            };
            match result {
                Ok(()) => return,
                Err(e) if attempt < self.compensation_attempts => {
                    warn!(
                        "补偿写入失败（第 {} 次），稍后重试: {} target={} err={}",
                        attempt, plan.kind, plan.target_id, e
                    );
                    tokio::time::sleep(self.compensation_backoff * attempt).await;
                }
                Err(e) => {
                    // 重试耗尽，计数器从此漂移，交给对账处理
                    error!(
                        "补偿重试耗尽: {}",
                        EngagementError::Compensation(e)
                    );
                    let event = EngagementEvent::CounterDrift {
                        kind: plan.kind,
                        target_id: plan.target_id,
                    };
                    let envelope = EventEnvelope::new(
                        event.aggregate_id(),
                        event.version(),
                        event,
                        ctx.correlation_id.clone(),
                        ctx.event_id.clone(),
                    );
                    if let Err(publish_err) = self.event_bus.publish(envelope).await {
                        error!("漂移事件发布失败: {}", publish_err);
                    }
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::{CapturingEventBus, NullEventBus, StubRelationStore};
    use std::sync::atomic::Ordering;

    fn attach_plan(store: &StubRelationStore, current: i32) -> DualWritePlan {
        store.seed_counter(RelationKind::Liked, 7, current);
        DualWritePlan {
            kind: RelationKind::Liked,
            owner_id: ProfileId::from(100),
            target_id: 7,
            direction: RelationDirection::Attach,
            counter_before: current,
            counter_after: current + 1,
        }
    }

    fn coordinator(
        store: Arc<StubRelationStore>,
    ) -> DualWriteCoordinator<NullEventBus> {
        DualWriteCoordinator::new(store, Arc::new(NullEventBus))
            .with_compensation_policy(3, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_both_writes_succeed() {
        let store = Arc::new(StubRelationStore::new());
        let plan = attach_plan(&store, 5);
        let report = coordinator(store.clone())
            .perform(&AppContext::new(), &plan)
            .await;

        assert!(report.is_clean());
        assert_eq!(store.row_count(RelationKind::Liked, 7), 1);
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(6));
    }

    #[tokio::test]
    async fn test_relation_failure_rolls_counter_back() {
        let store = Arc::new(StubRelationStore::new());
        let plan = attach_plan(&store, 5);
        store.fail_insert.store(true, Ordering::SeqCst);

        let report = coordinator(store.clone())
            .perform(&AppContext::new(), &plan)
            .await;

        // 关系侧错误作为主错误上报，计数器被补偿回旧值
        assert!(report.relation_error.is_some());
        assert!(report.counter_error.is_none());
        assert!(matches!(
            report.primary_error(),
            Some(EngagementError::RelationWrite(_))
        ));
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(5));
        assert_eq!(store.row_count(RelationKind::Liked, 7), 0);
    }

    #[tokio::test]
    async fn test_counter_failure_rolls_relation_back() {
        let store = Arc::new(StubRelationStore::new());
        let plan = attach_plan(&store, 5);
        // 计数写入全部失败
        store.allow_updates.store(0, Ordering::SeqCst);

        let report = coordinator(store.clone())
            .perform(&AppContext::new(), &plan)
            .await;

        assert!(report.relation_error.is_none());
        assert!(report.counter_error.is_some());
        assert!(matches!(
            report.primary_error(),
            Some(EngagementError::CounterWrite(_))
        ));
        // 已插入的关系行被补偿删除
        assert_eq!(store.row_count(RelationKind::Liked, 7), 0);
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(5));
    }

    #[tokio::test]
    async fn test_both_failures_skip_compensation() {
        let store = Arc::new(StubRelationStore::new());
        let plan = attach_plan(&store, 5);
        store.fail_insert.store(true, Ordering::SeqCst);
        store.allow_updates.store(0, Ordering::SeqCst);

        let report = coordinator(store.clone())
            .perform(&AppContext::new(), &plan)
            .await;

        assert!(report.relation_error.is_some());
        assert!(report.counter_error.is_some());
        // 没有任何补偿动作：没有删除，计数写入只尝试了前向那一次
        assert_eq!(store.delete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(5));
    }

    #[tokio::test]
    async fn test_detach_counter_failure_reinserts_row() {
        let store = Arc::new(StubRelationStore::new());
        store.seed_counter(RelationKind::Liked, 7, 1);
        store
            .insert_relation_row(RelationKind::Liked, ProfileId::from(100), 7)
            .await
            .unwrap();
        // 前向删除成功后计数写入失败
        store.allow_updates.store(0, Ordering::SeqCst);

        let plan = DualWritePlan {
            kind: RelationKind::Liked,
            owner_id: ProfileId::from(100),
            target_id: 7,
            direction: RelationDirection::Detach,
            counter_before: 1,
            counter_after: 0,
        };
        let report = coordinator(store.clone())
            .perform(&AppContext::new(), &plan)
            .await;

        assert!(report.counter_error.is_some());
        // 被删掉的关系行被重新插入
        assert_eq!(store.row_count(RelationKind::Liked, 7), 1);
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(1));
    }

    #[tokio::test]
    async fn test_exhausted_compensation_publishes_drift_event() {
        let store = Arc::new(StubRelationStore::new());
        let plan = attach_plan(&store, 5);
        // 前向计数写入成功，之后的补偿写入全部失败
        store.fail_insert.store(true, Ordering::SeqCst);
        store.allow_updates.store(1, Ordering::SeqCst);

        let bus = Arc::new(CapturingEventBus::new());
        let coordinator = DualWriteCoordinator::new(store.clone(), bus.clone())
            .with_compensation_policy(2, Duration::ZERO);
        let report = coordinator.perform(&AppContext::new(), &plan).await;

        assert!(report.relation_error.is_some());
        // 前向 1 次 + 补偿 2 次
        assert_eq!(store.update_calls.load(Ordering::SeqCst), 3);
        // 计数器停留在错误的新值上，漂移事件已发布
        assert_eq!(store.counter(RelationKind::Liked, 7), Some(6));
        let events = bus.engagement_events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            EngagementEvent::CounterDrift {
                kind: RelationKind::Liked,
                target_id: 7
            }
        ));
    }
}
