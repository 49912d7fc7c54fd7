use application::error::AppError;
use application::event::event_bus::EventEnvelope;
use application::event::event_bus::{ErasedHandler, EventBus, Handler};
use async_trait::async_trait;
use futures::future::join_all;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 桥接，将 Handler<E> 擦除为 ErasedHandler
pub struct HandlerWrapper<E> {
    inner: Arc<dyn Handler<E>>,
}

#[async_trait]
impl<E> ErasedHandler for HandlerWrapper<E>
where
    E: Send + Sync + 'static,
{
    async fn handle_erased(&self, event: &(dyn Any + Send + Sync)) {
        if let Some(e) = event.downcast_ref::<EventEnvelope<E>>() {
            self.inner.handle(e).await;
        }
    }
}

/// 内存事件总线
#[derive(Clone)]
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<Arc<dyn ErasedHandler>>>>>,
    /// 是否异步触发处理器（不等待完成）
    fire_and_forget: bool,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            fire_and_forget: false,
        }
    }

    /// 异步触发的事件总线（发布方不等待处理器完成）
    pub fn new_async() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            fire_and_forget: true,
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish<E>(&self, event: EventEnvelope<E>) -> Result<(), AppError>
    where
        E: Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        let handlers: Option<Vec<Arc<dyn ErasedHandler>>> = {
            let guard = self.handlers.read().await;
            guard.get(&type_id).cloned()
        };

        if let Some(list) = handlers {
            if self.fire_and_forget {
                // 异步触发：spawn 单个任务处理所有 handlers
                let event_arc = Arc::new(event);
                tokio::spawn(async move {
                    let futures = list.iter().map(|h| h.handle_erased(event_arc.as_ref()));
                    join_all(futures).await;
                });
            } else {
                // 同步等待所有处理器完成
                let futures = list.iter().map(|h| h.handle_erased(&event));
                join_all(futures).await;
            }
        }
        Ok(())
    }

    async fn subscribe<E>(&mut self, handler: Arc<dyn Handler<E>>)
    where
        E: Send + Sync + 'static,
    {
        let wrapper = Arc::new(HandlerWrapper { inner: handler }) as Arc<dyn ErasedHandler>;
        self.handlers
            .write()
            .await
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapper);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingHandler {
        seen: Arc<AtomicU32>,
    }

    #[async_trait]
    impl Handler<u32> for CountingHandler {
        async fn handle(&self, event: &EventEnvelope<u32>) {
            self.seen.fetch_add(event.payload, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribed_handler() {
        use application::event::event_bus::{CorrelationId, EventId};

        let mut bus = InMemoryEventBus::new();
        let seen = Arc::new(AtomicU32::new(0));
        bus.subscribe::<u32>(Arc::new(CountingHandler { seen: seen.clone() }))
            .await;

        let envelope = EventEnvelope::new(1, 0, 5u32, CorrelationId::new(), EventId::new());
        bus.publish(envelope).await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }
}
