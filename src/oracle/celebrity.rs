//! `CelebrityOracleService`: a `BaseOracleService` plus `SimulateTrade`,
//! which dispatches `TradeProposed` synchronously to `CopyTradingEngine`.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::copy_trading::{CelebrityTradeSignal, CopyTradingEngine};
use crate::domain::{MarketEvent, MarketEventType};
use crate::ledger::LedgerError;
use crate::settlement::SettlementOutcome;

use super::base::BaseOracleService;
use super::OracleError;

pub struct CelebrityOracleService {
    base: BaseOracleService,
    copy_trading: Arc<CopyTradingEngine>,
}

impl CelebrityOracleService {
    pub fn new(base: BaseOracleService, copy_trading: Arc<CopyTradingEngine>) -> Self {
        Self { base, copy_trading }
    }

    pub fn base(&self) -> &BaseOracleService {
        &self.base
    }

    pub async fn create_market_event(
        &self,
        actor_id: &str,
        title: &str,
        event_type: MarketEventType,
        duration_minutes: i64,
    ) -> Result<MarketEvent, OracleError> {
        self.base.create_market_event(actor_id, title, event_type, duration_minutes).await
    }

    pub fn get_active_events(&self) -> Vec<MarketEvent> {
        self.base.get_active_events()
    }

    pub async fn notify_outcome_reached(
        &self,
        outcome_id: &str,
        confidence: Option<f64>,
        sources: Option<Vec<String>>,
    ) -> Result<SettlementOutcome, LedgerError> {
        self.base.notify_outcome_reached(outcome_id, confidence, sources).await
    }

    /// Validates terms, builds the signal, and dispatches it synchronously
    /// to the one subscriber this crate has: `CopyTradingEngine`.
    pub async fn simulate_trade(
        &self,
        operator_id: &str,
        amount: Decimal,
        outcome_id: &str,
        outcome_name: &str,
        actor_id: Option<String>,
    ) -> Result<CelebrityTradeSignal, OracleError> {
        if amount <= Decimal::ZERO {
            return Err(OracleError::NonPositiveAmount);
        }
        if outcome_id.trim().is_empty() {
            return Err(OracleError::BlankOutcomeId);
        }

        let signal = CelebrityTradeSignal {
            trade_id: Uuid::new_v4(),
            operator_id: operator_id.to_string(),
            amount,
            outcome_id: outcome_id.to_string(),
            outcome_name: outcome_name.to_string(),
            actor_id,
        };

        self.copy_trading.handle_trade_proposed(signal.clone()).await;

        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy_trading::ClearingIndex;
    use crate::domain::AccountType;
    use crate::ledger::LedgerPort;
    use crate::matching::{OrderBookStore, OutcomeRegistry};
    use crate::support::memory_backend::MemoryBackend;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn simulate_trade_rejects_non_positive_amount() {
        let backend = MemoryBackend::new();
        let base = BaseOracleService::new(
            "oracle-1",
            Arc::new(OutcomeRegistry::new()),
            Arc::new(OrderBookStore::new()),
            backend.events(),
        );
        let copy_trading = Arc::new(CopyTradingEngine::new(backend.ledger(), Arc::new(ClearingIndex::new())));
        let oracle = CelebrityOracleService::new(base, copy_trading);

        let err = oracle
            .simulate_trade("acme-operator", dec!(0), "drake-album-yes", "Drake Album", Some("Drake".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, OracleError::NonPositiveAmount));
    }

    #[tokio::test]
    async fn simulate_trade_clears_through_copy_trading() {
        let backend = MemoryBackend::new();
        let ledger = backend.ledger();
        ledger
            .create_account(None, "Drake Main Operating Account", AccountType::Asset, "acme-operator")
            .await
            .unwrap();

        let base = BaseOracleService::new(
            "oracle-1",
            Arc::new(OutcomeRegistry::new()),
            Arc::new(OrderBookStore::new()),
            backend.events(),
        );
        let copy_trading = Arc::new(CopyTradingEngine::new(ledger.clone(), Arc::new(ClearingIndex::new())));
        let oracle = CelebrityOracleService::new(base, copy_trading.clone());

        oracle
            .simulate_trade("acme-operator", dec!(100.00), "drake-album-yes", "Drake Album", Some("Drake".to_string()))
            .await
            .unwrap();

        assert_eq!(copy_trading.get_clearing_transaction_ids_for_outcome("drake-album-yes").await.len(), 1);
    }
}
