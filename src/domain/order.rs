use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Buy-side or sell-side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// Accepts `"Buy"`, `"Sell"`, `"0"`, `"1"` case-insensitively, matching
    /// the external HTTP contract.
    pub fn parse(raw: &str) -> Option<Side> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" | "bid" | "0" => Some(Side::Bid),
            "sell" | "ask" | "1" => Some(Side::Ask),
            _ => None,
        }
    }
}

/// A resting or incoming limit order for a single outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub outcome_id: String,
    pub operator_id: Option<String>,
    pub side: Side,
    pub price: Decimal,
    pub remaining_quantity: Decimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Set on orders produced by `Social::MirrorOrder`; prevents a mirrored
    /// order from itself being mirrored.
    pub is_mirror: bool,
}

impl Order {
    pub fn new(
        user_id: impl Into<String>,
        outcome_id: impl Into<String>,
        operator_id: Option<String>,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            outcome_id: outcome_id.into(),
            operator_id,
            side,
            price,
            remaining_quantity: quantity,
            created_at: chrono::Utc::now(),
            is_mirror: false,
        }
    }

    pub fn mirrored_for(&self, follower_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: follower_id.to_string(),
            outcome_id: self.outcome_id.clone(),
            operator_id: self.operator_id.clone(),
            side: self.side,
            price: self.price,
            remaining_quantity: self.remaining_quantity,
            created_at: chrono::Utc::now(),
            is_mirror: true,
        }
    }
}
