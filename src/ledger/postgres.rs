use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Account, AccountType, Direction, JournalEntry, Phase, Transaction, TransactionType};

use super::core::{aggregate_balance, verify_balanced};
use super::{LedgerError, LedgerPort};

/// Postgres-backed ledger. Owns the `accounts`, `transactions` and
/// `journal_entries` tables.
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerPort for PgLedger {
    async fn create_account(
        &self,
        id: Option<Uuid>,
        name: &str,
        account_type: AccountType,
        operator_id: &str,
    ) -> Result<Account, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::BlankName);
        }
        let account = Account {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: name.to_string(),
            account_type,
            operator_id: operator_id.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, account_type, operator_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(account.account_type)
        .bind(&account.operator_id)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(account_id = %account.id, operator_id, "account created");
        Ok(account)
    }

    async fn post_transaction(
        &self,
        entries: Vec<JournalEntry>,
        settles_clearing_transaction_id: Option<Uuid>,
        transaction_type: Option<TransactionType>,
    ) -> Result<Uuid, LedgerError> {
        verify_balanced(&entries)?;

        let transaction_id = Uuid::new_v4();
        let created_at = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (id, settles_clearing_transaction_id, transaction_type, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(transaction_id)
        .bind(settles_clearing_transaction_id)
        .bind(transaction_type)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        for entry in &entries {
            sqlx::query(
                r#"
                INSERT INTO journal_entries (id, transaction_id, account_id, amount, direction, phase)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(transaction_id)
            .bind(entry.account_id)
            .bind(entry.amount)
            .bind(entry.direction)
            .bind(entry.phase)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(transaction_id)
    }

    async fn account_balance(&self, account_id: Uuid, phase: Option<Phase>) -> Result<Decimal, LedgerError> {
        let rows: Vec<(Decimal, Direction, Phase)> = sqlx::query_as(
            r#"
            SELECT amount, direction, phase
            FROM journal_entries
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        let owned: Vec<(Direction, Phase, Decimal)> = rows.into_iter().map(|(a, d, p)| (d, p, a)).collect();
        Ok(aggregate_balance(owned.iter().map(|(d, p, a)| (d, p, a)), phase))
    }

    async fn operator_balances(&self, operator_id: &str) -> Result<HashMap<Uuid, Decimal>, LedgerError> {
        let account_ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"SELECT id FROM accounts WHERE operator_id = $1"#,
        )
        .bind(operator_id)
        .fetch_all(&self.pool)
        .await?;

        let mut balances = HashMap::new();
        for (account_id,) in account_ids {
            balances.insert(account_id, self.account_balance(account_id, None).await?);
        }
        Ok(balances)
    }

    async fn find_account_for_user(&self, user_id: &str) -> Result<Option<Account>, LedgerError> {
        let account: Option<Account> = sqlx::query_as(
            r#"
            SELECT id, name, account_type, operator_id, created_at
            FROM accounts
            WHERE operator_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_account_by_name(&self, operator_id: &str, name: &str) -> Result<Option<Account>, LedgerError> {
        let account: Option<Account> = sqlx::query_as(
            r#"
            SELECT id, name, account_type, operator_id, created_at
            FROM accounts
            WHERE operator_id = $1 AND name = $2
            LIMIT 1
            "#,
        )
        .bind(operator_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError> {
        let header: Option<(Uuid, Option<Uuid>, Option<TransactionType>, chrono::DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, settles_clearing_transaction_id, transaction_type, created_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, settles_clearing_transaction_id, transaction_type, created_at)) = header else {
            return Ok(None);
        };

        let rows: Vec<(Uuid, Decimal, Direction, Phase)> = sqlx::query_as(
            r#"
            SELECT account_id, amount, direction, phase
            FROM journal_entries
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|(account_id, amount, direction, phase)| JournalEntry::new(account_id, amount, direction, phase))
            .collect();

        Ok(Some(Transaction {
            id,
            entries,
            created_at,
            settles_clearing_transaction_id,
            transaction_type,
        }))
    }

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, LedgerError> {
        let account: Option<Account> = sqlx::query_as(
            r#"SELECT id, name, account_type, operator_id, created_at FROM accounts WHERE id = $1"#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }
}
