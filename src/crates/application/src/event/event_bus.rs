use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::event::DomainEvent;
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

/// 事件信封
#[derive(Debug, Clone)]
pub struct EventEnvelope<T> {
    pub id: EventId,
    pub aggregate_id: i64,
    pub version: i64,
    pub timestamp: DateTime<Utc>,
    pub payload: T,
    // correlation_id 贯穿一次请求，causation_id 指向引发本事件的事件
    pub correlation_id: CorrelationId,
    pub causation_id: EventId,
}

impl<T> EventEnvelope<T> {
    pub fn new(
        aggregate_id: i64,
        version: i64,
        payload: T,
        correlation_id: CorrelationId,
        causation_id: EventId,
    ) -> Self {
        Self {
            id: EventId::new(),
            aggregate_id,
            version,
            timestamp: Utc::now(),
            payload,
            correlation_id,
            causation_id,
        }
    }

    pub fn from_domain_event<E: DomainEvent>(
        event: E,
        correlation_id: CorrelationId,
        causation_id: EventId,
    ) -> EventEnvelope<E> {
        EventEnvelope {
            id: EventId::new(),
            aggregate_id: event.aggregate_id(),
            version: event.version(),
            timestamp: Utc::now(),
            payload: event,
            correlation_id,
            causation_id,
        }
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

/// 强类型 Handler
#[async_trait]
pub trait Handler<E>: Send + Sync {
    async fn handle(&self, event: &EventEnvelope<E>);
}

/// 类型擦除 Handler，用 Any 做事件擦除
#[async_trait]
pub trait ErasedHandler: Send + Sync {
    async fn handle_erased(&self, event: &(dyn Any + Send + Sync));
}

/// 事件总线抽象
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish<E>(&self, event: EventEnvelope<E>) -> Result<(), AppError>
    where
        E: Send + Sync + 'static;

    async fn subscribe<E>(&mut self, handler: Arc<dyn Handler<E>>)
    where
        E: Send + Sync + 'static;
}
