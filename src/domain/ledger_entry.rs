use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "direction", rename_all = "lowercase")]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    /// Flip used by `AutoSettlement` when it mirrors a Clearing transaction
    /// into its reversing Settlement transaction.
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Debit => Direction::Credit,
            Direction::Credit => Direction::Debit,
        }
    }

    /// Signed multiplier for the Σ(Debit) − Σ(Credit) balance convention.
    pub fn sign(self) -> Decimal {
        match self {
            Direction::Debit => Decimal::ONE,
            Direction::Credit => -Decimal::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "phase", rename_all = "lowercase")]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Clearing,
    Settlement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "lowercase")]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Trade,
}

/// A single debit or credit leg. Only ever lives inside a `Transaction`;
/// never mutated once posted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub direction: Direction,
    pub phase: Phase,
}

impl JournalEntry {
    pub fn new(account_id: Uuid, amount: Decimal, direction: Direction, phase: Phase) -> Self {
        Self {
            account_id,
            amount,
            direction,
            phase,
        }
    }
}

/// A balanced set of journal entries posted atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub entries: Vec<JournalEntry>,
    pub created_at: DateTime<Utc>,
    pub settles_clearing_transaction_id: Option<Uuid>,
    pub transaction_type: Option<TransactionType>,
}
