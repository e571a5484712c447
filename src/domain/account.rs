use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the five classical accounting types. Determines the sign
/// convention a caller applies to a balance; the ledger itself is agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "asset",
            AccountType::Liability => "liability",
            AccountType::Equity => "equity",
            AccountType::Revenue => "revenue",
            AccountType::Expense => "expense",
        }
    }
}

/// A ledger account. Immutable after creation; referenced by journal
/// entries and outcome-ledger entries by id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub account_type: AccountType,
    pub operator_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
