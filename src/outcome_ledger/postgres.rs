use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Direction, NewOutcomeEntry};

use super::{OutcomeLedgerError, OutcomeLedgerPort};

/// Postgres-backed outcome ledger. Owns the `ledger_entries` table.
pub struct PgOutcomeLedger {
    pool: PgPool,
}

impl PgOutcomeLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutcomeLedgerPort for PgOutcomeLedger {
    async fn append_entries(&self, entries: Vec<NewOutcomeEntry>) -> Result<(), OutcomeLedgerError> {
        let mut tx = self.pool.begin().await?;
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO ledger_entries (id, account_id, asset_type, amount, direction, occurred_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(entry.account_id)
            .bind(&entry.asset_type)
            .bind(entry.amount)
            .bind(entry.direction)
            .bind(entry.occurred_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn net_holdings(&self, asset_type: &str) -> Result<HashMap<Uuid, Decimal>, OutcomeLedgerError> {
        let rows: Vec<(Uuid, Decimal, Direction)> = sqlx::query_as(
            r#"
            SELECT account_id, amount, direction
            FROM ledger_entries
            WHERE asset_type = $1
            "#,
        )
        .bind(asset_type)
        .fetch_all(&self.pool)
        .await?;

        let mut holdings: HashMap<Uuid, Decimal> = HashMap::new();
        for (account_id, amount, direction) in rows {
            let entry = holdings.entry(account_id).or_insert(Decimal::ZERO);
            *entry += direction.sign() * amount;
        }
        Ok(holdings)
    }

    async fn holdings_for_account(&self, account_id: Uuid) -> Result<HashMap<String, Decimal>, OutcomeLedgerError> {
        let rows: Vec<(String, Decimal, Direction)> = sqlx::query_as(
            r#"
            SELECT asset_type, amount, direction
            FROM ledger_entries
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        let mut holdings: HashMap<String, Decimal> = HashMap::new();
        for (asset_type, amount, direction) in rows {
            let entry = holdings.entry(asset_type).or_insert(Decimal::ZERO);
            *entry += direction.sign() * amount;
        }
        Ok(holdings)
    }
}
