use crate::event::event_bus::{EventEnvelope, Handler};
use async_trait::async_trait;
use domain::engagement::{EngagementEvent, RelationStore};
use log::{error, info};
use std::sync::Arc;

/// 计数器对账处理器。
///
/// 双写协调器在补偿重试耗尽后发布 CounterDrift 事件，
/// 这里用关系表的实际行数作为基准真值，把父实体的计数列重写一遍。
/// 对账本身再失败只能记日志，下一次漂移事件会再触发一轮。
pub struct CounterReconciler {
    relation_store: Arc<dyn RelationStore>,
}

impl CounterReconciler {
    pub fn new(relation_store: Arc<dyn RelationStore>) -> Self {
        Self { relation_store }
    }
}

#[async_trait]
impl Handler<EngagementEvent> for CounterReconciler {
    async fn handle(&self, event: &EventEnvelope<EngagementEvent>) {
        let EngagementEvent::CounterDrift { kind, target_id } = &event.payload;
        let count = match self
            .relation_store
            .count_relation_rows(*kind, *target_id)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                error!("对账统计失败: {} target={} err={}", kind, target_id, e);
                return;
            }
        };
        // 漂移幅度只用于日志，读失败不影响对账
        let drifted = self
            .relation_store
            .read_counter(*kind, *target_id)
            .await
            .ok()
            .flatten();
        match self
            .relation_store
            .update_counter(*kind, *target_id, count as i32)
            .await
        {
            Ok(()) => {
                info!(
                    "计数器对账完成: {} target={} {:?} -> {}",
                    kind, target_id, drifted, count
                );
            }
            Err(e) => {
                error!("对账回写失败: {} target={} err={}", kind, target_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::StubRelationStore;
    use crate::event::event_bus::{CorrelationId, EventId};
    use domain::engagement::RelationKind;
    use domain::value::ProfileId;

    #[tokio::test]
    async fn test_reconciler_rewrites_counter_from_ground_truth() {
        let store = Arc::new(StubRelationStore::new());
        // 两条真实关系行，但计数器漂移到了 9
        store
            .insert_relation_row(RelationKind::Liked, ProfileId::from(1), 7)
            .await
            .unwrap();
        store
            .insert_relation_row(RelationKind::Liked, ProfileId::from(2), 7)
            .await
            .unwrap();
        store.seed_counter(RelationKind::Liked, 7, 9);

        let reconciler = CounterReconciler::new(store.clone());
        let event = EngagementEvent::CounterDrift {
            kind: RelationKind::Liked,
            target_id: 7,
        };
        let envelope =
            EventEnvelope::new(7, 0, event, CorrelationId::new(), EventId::new());
        reconciler.handle(&envelope).await;

        assert_eq!(store.counter(RelationKind::Liked, 7), Some(2));
    }
}
