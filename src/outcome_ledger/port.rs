use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::NewOutcomeEntry;

use super::OutcomeLedgerError;

/// The asset-leg half of the double-entry model. Two adapters exist: a
/// Postgres-backed one owning the `ledger_entries` table, and an in-memory
/// one for tests.
#[async_trait]
pub trait OutcomeLedgerPort: Send + Sync {
    /// Persists a batch of entries in one round-trip. `BookTrade` and
    /// `MarketResolver::ResolveMarket` both build their entries with pure
    /// helpers and hand them here together.
    async fn append_entries(&self, entries: Vec<NewOutcomeEntry>) -> Result<(), OutcomeLedgerError>;

    /// Σ(Debit) − Σ(Credit) per account for one asset type — each
    /// account's net holding.
    async fn net_holdings(&self, asset_type: &str) -> Result<HashMap<Uuid, Decimal>, OutcomeLedgerError>;

    /// Σ(Debit) − Σ(Credit) per asset type for one account, for
    /// `/api/portfolio/{accountId}`.
    async fn holdings_for_account(&self, account_id: Uuid) -> Result<HashMap<String, Decimal>, OutcomeLedgerError>;
}
