use async_trait::async_trait;

use crate::domain::{DomainEvent, NewDomainEvent};

use super::EventStoreError;

/// Append-only domain-event log, read back indexed by market or by user.
#[async_trait]
pub trait EventStorePort: Send + Sync {
    async fn append(&self, event: NewDomainEvent) -> Result<DomainEvent, EventStoreError>;

    /// Appends every event in order; used when a single `ProcessOrder` call
    /// produces more than one event (e.g. `OrderPlaced` plus N
    /// `TradeMatched`, each indexed twice).
    async fn append_many(&self, events: Vec<NewDomainEvent>) -> Result<Vec<DomainEvent>, EventStoreError>;

    /// Oldest-first, for `/api/audit/market/{marketId}`.
    async fn by_market(&self, market_id: &str) -> Result<Vec<DomainEvent>, EventStoreError>;

    /// Oldest-first, for `/api/audit/user/{userId}` and `PositionService`.
    async fn by_user(&self, user_id: &str) -> Result<Vec<DomainEvent>, EventStoreError>;
}
