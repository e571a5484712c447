use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Account, AccountType, JournalEntry, Phase, Transaction, TransactionType};

use super::LedgerError;

/// The accounts-and-transactions half of the double-entry ledger. Two
/// adapters exist: a Postgres-backed one for production (`postgres::PgLedger`)
/// and an in-memory one for tests (`support::memory_backend`).
#[async_trait]
pub trait LedgerPort: Send + Sync {
    async fn create_account(
        &self,
        id: Option<Uuid>,
        name: &str,
        account_type: AccountType,
        operator_id: &str,
    ) -> Result<Account, LedgerError>;

    async fn post_transaction(
        &self,
        entries: Vec<JournalEntry>,
        settles_clearing_transaction_id: Option<Uuid>,
        transaction_type: Option<TransactionType>,
    ) -> Result<Uuid, LedgerError>;

    async fn account_balance(&self, account_id: Uuid, phase: Option<Phase>) -> Result<Decimal, LedgerError>;

    async fn operator_balances(&self, operator_id: &str) -> Result<HashMap<Uuid, Decimal>, LedgerError>;

    /// First account whose `operator_id` equals `user_id`, ordered by
    /// creation time. The matching engine resolves trade counterparties
    /// this way, treating user-id as operator-id for the lookup.
    async fn find_account_for_user(&self, user_id: &str) -> Result<Option<Account>, LedgerError>;

    async fn find_account_by_name(&self, operator_id: &str, name: &str) -> Result<Option<Account>, LedgerError>;

    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError>;

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, LedgerError>;
}
