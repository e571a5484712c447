use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "market_event_type", rename_all = "lowercase")]
#[serde(rename_all = "camelCase")]
pub enum MarketEventType {
    Base,
    Flash,
    Celebrity,
    Sports,
}

/// A celebrity-driven market created by an `Oracle`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MarketEvent {
    pub id: Uuid,
    pub title: String,
    pub event_type: MarketEventType,
    pub outcome_id: String,
    pub actor_id: String,
    pub responsible_oracle_id: String,
    pub duration_minutes: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl MarketEvent {
    pub fn is_active(&self) -> bool {
        Utc::now() < self.expires_at
    }
}
