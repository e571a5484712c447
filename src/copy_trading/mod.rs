//! `CopyTradingEngine`: turns a celebrity trade signal into a Clearing
//! transaction between the celebrity's own account and a per-outcome
//! system-owned Market Holding Account.

mod clearing_index;
mod error;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::error;
use uuid::Uuid;

use crate::domain::{AccountType, Direction, JournalEntry, Phase, TransactionType};
use crate::ledger::LedgerPort;
use crate::support::keyed_lock::KeyedAsyncMutex;

pub use clearing_index::ClearingIndex;
pub use error::CopyTradingError;

const SYSTEM_OPERATOR_ID: &str = "system";

/// Dispatched by `Oracle::SimulateTrade` and consumed here.
#[derive(Debug, Clone)]
pub struct CelebrityTradeSignal {
    pub trade_id: Uuid,
    pub operator_id: String,
    pub amount: Decimal,
    pub outcome_id: String,
    pub outcome_name: String,
    pub actor_id: Option<String>,
}

pub struct CopyTradingEngine {
    ledger: Arc<dyn LedgerPort>,
    clearing_index: Arc<ClearingIndex>,
    market_holding_lock: KeyedAsyncMutex<String>,
}

impl CopyTradingEngine {
    pub fn new(ledger: Arc<dyn LedgerPort>, clearing_index: Arc<ClearingIndex>) -> Self {
        Self {
            ledger,
            clearing_index,
            market_holding_lock: KeyedAsyncMutex::new(),
        }
    }

    pub fn clearing_index(&self) -> &ClearingIndex {
        &self.clearing_index
    }

    pub async fn get_clearing_transaction_ids_for_outcome(&self, outcome_id: &str) -> Vec<Uuid> {
        self.clearing_index.transaction_ids_for(outcome_id).await
    }

    pub async fn get_last_clearing_transaction_id_for_outcome(&self, outcome_id: &str) -> Option<Uuid> {
        self.clearing_index.last_transaction_id_for(outcome_id).await
    }

    /// Fire-and-forget from the oracle's point of view: errors are logged
    /// and swallowed here so one bad signal never breaks the caller.
    pub async fn handle_trade_proposed(&self, signal: CelebrityTradeSignal) {
        if let Err(err) = self.clear_signal(&signal).await {
            error!(trade_id = %signal.trade_id, outcome_id = %signal.outcome_id, error = %err, "copy-trading signal failed");
        }
    }

    async fn clear_signal(&self, signal: &CelebrityTradeSignal) -> Result<Uuid, CopyTradingError> {
        let actor_id = signal.actor_id.clone().unwrap_or_default();
        let celebrity_account_name = format!("{actor_id} Main Operating Account");
        let celebrity_account = self
            .ledger
            .find_account_by_name(&signal.operator_id, &celebrity_account_name)
            .await?
            .ok_or_else(|| CopyTradingError::CelebrityAccountNotFound(actor_id.clone(), signal.operator_id.clone()))?;

        let market_holding_account_name = format!("Market Holding Account - {}", signal.outcome_name);
        let market_holding_account = {
            let _guard = self.market_holding_lock.lock(signal.outcome_id.to_ascii_lowercase()).await;
            match self
                .ledger
                .find_account_by_name(SYSTEM_OPERATOR_ID, &market_holding_account_name)
                .await?
            {
                Some(account) => account,
                None => {
                    self.ledger
                        .create_account(None, &market_holding_account_name, AccountType::Liability, SYSTEM_OPERATOR_ID)
                        .await?
                }
            }
        };

        let entries = vec![
            JournalEntry::new(celebrity_account.id, signal.amount, Direction::Debit, Phase::Clearing),
            JournalEntry::new(market_holding_account.id, signal.amount, Direction::Credit, Phase::Clearing),
        ];

        let transaction_id = self
            .ledger
            .post_transaction(entries, None, Some(TransactionType::Trade))
            .await?;

        self.clearing_index.append(&signal.outcome_id, transaction_id).await;
        crate::metrics::record_copy_trade_signal();

        Ok(transaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::memory_backend::MemoryBackend;
    use rust_decimal_macros::dec;

    async fn engine_with_celebrity_account() -> (CopyTradingEngine, Arc<dyn LedgerPort>, String) {
        let backend = MemoryBackend::new();
        let ledger = backend.ledger();
        ledger
            .create_account(None, "Drake Main Operating Account", AccountType::Asset, "acme-operator")
            .await
            .unwrap();
        let engine = CopyTradingEngine::new(ledger.clone(), Arc::new(ClearingIndex::new()));
        (engine, ledger, "acme-operator".to_string())
    }

    #[tokio::test]
    async fn clears_a_signal_and_indexes_the_transaction() {
        let (engine, ledger, operator_id) = engine_with_celebrity_account().await;
        let signal = CelebrityTradeSignal {
            trade_id: Uuid::new_v4(),
            operator_id,
            amount: dec!(500.00),
            outcome_id: "drake-album-yes".to_string(),
            outcome_name: "Drake Album".to_string(),
            actor_id: Some("Drake".to_string()),
        };

        let transaction_id = engine.clear_signal(&signal).await.unwrap();
        assert_eq!(
            engine.get_last_clearing_transaction_id_for_outcome("drake-album-yes").await,
            Some(transaction_id)
        );

        let market_holding = ledger
            .find_account_by_name("system", "Market Holding Account - Drake Album")
            .await
            .unwrap()
            .unwrap();
        let balance = ledger.account_balance(market_holding.id, Some(Phase::Clearing)).await.unwrap();
        assert_eq!(balance, dec!(-500.00));
    }

    #[tokio::test]
    async fn missing_celebrity_account_fails() {
        let backend = MemoryBackend::new();
        let engine = CopyTradingEngine::new(backend.ledger(), Arc::new(ClearingIndex::new()));
        let signal = CelebrityTradeSignal {
            trade_id: Uuid::new_v4(),
            operator_id: "acme-operator".to_string(),
            amount: dec!(500.00),
            outcome_id: "drake-album-yes".to_string(),
            outcome_name: "Drake Album".to_string(),
            actor_id: Some("Drake".to_string()),
        };
        let err = engine.clear_signal(&signal).await.unwrap_err();
        assert!(matches!(err, CopyTradingError::CelebrityAccountNotFound(_, _)));
    }
}
