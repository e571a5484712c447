use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only audit/projection record. `event_type` is a free-form tag
/// (`"OrderPlaced"`, `"TradeMatched"`, …); `payload` is whatever shape that
/// event type defines, stored as JSON so the store stays generic.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DomainEvent {
    pub id: i64,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
    pub market_id: Option<String>,
    pub user_id: Option<String>,
}

/// Shape of an event before it has been assigned a monotone id.
#[derive(Debug, Clone)]
pub struct NewDomainEvent {
    pub event_type: String,
    pub payload: serde_json::Value,
    pub market_id: Option<String>,
    pub user_id: Option<String>,
}

impl NewDomainEvent {
    pub fn new(
        event_type: impl Into<String>,
        payload: serde_json::Value,
        market_id: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
            market_id,
            user_id,
        }
    }
}

/// Payload shape for the `TradeMatched` event, referenced both by the
/// writer (`MatchingEngine`) and the reader (`PositionService`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeMatchedPayload {
    pub price: rust_decimal::Decimal,
    pub quantity: rust_decimal::Decimal,
    pub buyer_user_id: String,
    pub seller_user_id: String,
    pub outcome_id: String,
}

/// Payload shape for the `OrderPlaced` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlacedPayload {
    pub order_id: uuid::Uuid,
    pub user_id: String,
    pub outcome_id: String,
    pub side: super::Side,
    pub price: rust_decimal::Decimal,
    pub quantity: rust_decimal::Decimal,
}
