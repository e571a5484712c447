use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Direction;

/// A share leg in an outcome asset, e.g. `DRAKE_ALBUM`. Four of these are
/// produced per matched trade (buyer+seller × cash+asset legs split between
/// the cash-leg `Ledger` transaction and these asset-leg entries).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OutcomeEntry {
    pub id: Uuid,
    pub account_id: Uuid,
    pub asset_type: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub occurred_at: DateTime<Utc>,
}

/// Entry shape before it has been assigned an id / persisted.
#[derive(Debug, Clone)]
pub struct NewOutcomeEntry {
    pub account_id: Uuid,
    pub asset_type: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub occurred_at: DateTime<Utc>,
}

impl NewOutcomeEntry {
    pub fn new(account_id: Uuid, asset_type: impl Into<String>, amount: Decimal, direction: Direction) -> Self {
        Self {
            account_id,
            asset_type: asset_type.into(),
            amount,
            direction,
            occurred_at: Utc::now(),
        }
    }
}
