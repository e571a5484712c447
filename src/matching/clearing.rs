//! The atomic cash-leg + share-leg write a single match requires (§4.M
//! steps 4a–4d). Both legs land in one database transaction even though
//! they belong conceptually to two different ports (`LedgerPort` for cash,
//! `OutcomeLedgerPort` for shares) — a dedicated adapter owns both tables so
//! the transaction really is one round-trip, not two ports each opening
//! their own.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Direction, JournalEntry, Phase, TransactionType};
use crate::ledger::core::verify_balanced;
use crate::outcome_ledger::core::book_trade_entries;

use super::MatchingError;

/// Resolved counterparties and terms for one match, ready to clear.
pub struct TradeToClear {
    pub buyer_account_id: Uuid,
    pub seller_account_id: Uuid,
    pub price: Decimal,
    pub quantity: Decimal,
    pub outcome_asset_type: String,
}

impl TradeToClear {
    pub fn required_buyer_funds(&self) -> Decimal {
        self.price * self.quantity
    }
}

#[async_trait]
pub trait ClearingPort: Send + Sync {
    /// Checks the buyer's Clearing-phase balance, then — if sufficient —
    /// posts the Ledger cash-leg transaction and the four OutcomeLedger
    /// share-leg entries atomically. Returns the Ledger transaction id.
    async fn clear_trade(&self, trade: &TradeToClear) -> Result<Uuid, MatchingError>;
}

/// Postgres adapter spanning `journal_entries`/`transactions` and
/// `ledger_entries` in a single `pool.begin()`.
pub struct PgClearing {
    pool: PgPool,
}

impl PgClearing {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClearingPort for PgClearing {
    async fn clear_trade(&self, trade: &TradeToClear) -> Result<Uuid, MatchingError> {
        let required = trade.required_buyer_funds();

        let mut tx = self.pool.begin().await?;

        let rows: Vec<(Decimal, Direction, Phase)> = sqlx::query_as(
            r#"
            SELECT amount, direction, phase
            FROM journal_entries
            WHERE account_id = $1
            "#,
        )
        .bind(trade.buyer_account_id)
        .fetch_all(&mut *tx)
        .await?;

        let available = rows
            .iter()
            .filter(|(_, _, phase)| *phase == Phase::Clearing)
            .fold(Decimal::ZERO, |acc, (amount, direction, _)| acc + direction.sign() * amount);

        if available < required {
            tx.rollback().await?;
            return Err(MatchingError::InsufficientFunds { required, available });
        }

        let entries = vec![
            JournalEntry::new(trade.buyer_account_id, required, Direction::Credit, Phase::Clearing),
            JournalEntry::new(trade.seller_account_id, required, Direction::Debit, Phase::Clearing),
        ];
        verify_balanced(&entries)?;

        let transaction_id = Uuid::new_v4();
        let created_at = chrono::Utc::now();
        sqlx::query(
            r#"
            INSERT INTO transactions (id, settles_clearing_transaction_id, transaction_type, created_at)
            VALUES ($1, NULL, $2, $3)
            "#,
        )
        .bind(transaction_id)
        .bind(TransactionType::Trade)
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

        let outcome_entries = book_trade_entries(
            trade.buyer_account_id,
            trade.seller_account_id,
            required,
            &trade.outcome_asset_type,
            trade.quantity,
        )?;
        for entry in outcome_entries {
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
        Ok(transaction_id)
    }
}
