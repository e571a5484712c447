//! `BaseOracleService`: market-event lifecycle shared by every concrete
//! oracle. `NotifyOutcomeReached` resolves `AutoSettlement` lazily because
//! at construction time (Oracle is built before AutoSettlement — see the
//! bootstrap order) no `Arc<AutoSettlement>` exists yet.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use serde_json::json;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::{MarketEvent, MarketEventType, NewDomainEvent};
use crate::events::EventStorePort;
use crate::ledger::LedgerError;
use crate::matching::{OrderBookStore, OutcomeRegistry};
use crate::settlement::{AutoSettlement, SettlementOutcome};

use super::OracleError;

const FLASH_MAX_DURATION_MINUTES: i64 = 15;
const BASE_MIN_DURATION_MINUTES: i64 = 60;

fn normalise_duration(event_type: MarketEventType, requested_minutes: i64) -> i64 {
    match event_type {
        MarketEventType::Flash => requested_minutes.min(FLASH_MAX_DURATION_MINUTES).max(1),
        MarketEventType::Base => requested_minutes.max(BASE_MIN_DURATION_MINUTES),
        MarketEventType::Celebrity | MarketEventType::Sports => requested_minutes.max(1),
    }
}

pub struct BaseOracleService {
    oracle_id: String,
    outcome_registry: Arc<OutcomeRegistry>,
    books: Arc<OrderBookStore>,
    events: Arc<dyn EventStorePort>,
    market_events: DashMap<Uuid, MarketEvent>,
    settlement: OnceCell<Arc<AutoSettlement>>,
}

impl BaseOracleService {
    pub fn new(
        oracle_id: impl Into<String>,
        outcome_registry: Arc<OutcomeRegistry>,
        books: Arc<OrderBookStore>,
        events: Arc<dyn EventStorePort>,
    ) -> Self {
        Self {
            oracle_id: oracle_id.into(),
            outcome_registry,
            books,
            events,
            market_events: DashMap::new(),
            settlement: OnceCell::new(),
        }
    }

    /// Wired once during bootstrap, after `AutoSettlement` exists.
    pub fn bind_settlement(&self, settlement: Arc<AutoSettlement>) {
        let _ = self.settlement.set(settlement);
    }

    pub async fn create_market_event(
        &self,
        actor_id: &str,
        title: &str,
        event_type: MarketEventType,
        duration_minutes: i64,
    ) -> Result<MarketEvent, OracleError> {
        let id = Uuid::new_v4();
        let outcome_id = format!("outcome-{}", hex::encode(id.as_bytes()));
        let minutes = normalise_duration(event_type, duration_minutes);
        let created_at = Utc::now();
        let expires_at = created_at + Duration::minutes(minutes);

        let event = MarketEvent {
            id,
            title: title.to_string(),
            event_type,
            outcome_id: outcome_id.clone(),
            actor_id: actor_id.to_string(),
            responsible_oracle_id: self.oracle_id.clone(),
            duration_minutes: minutes,
            created_at,
            expires_at,
        };

        self.outcome_registry.register_binary_market(&outcome_id);
        self.books.get_or_create(&format!("{outcome_id}-yes"));
        self.books.get_or_create(&format!("{outcome_id}-no"));
        self.market_events.insert(id, event.clone());

        self.events
            .append(NewDomainEvent::new(
                "MarketOpened",
                json!({
                    "marketEventId": id,
                    "outcomeId": outcome_id,
                    "title": title,
                }),
                Some(outcome_id),
                None,
            ))
            .await?;

        Ok(event)
    }

    pub fn get_active_events(&self) -> Vec<MarketEvent> {
        self.market_events
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|event| event.is_active())
            .collect()
    }

    pub async fn notify_outcome_reached(
        &self,
        outcome_id: &str,
        confidence: Option<f64>,
        sources: Option<Vec<String>>,
    ) -> Result<SettlementOutcome, LedgerError> {
        match self.settlement.get() {
            Some(settlement) => settlement.settle_outcome(outcome_id, confidence, sources).await,
            None => Ok(SettlementOutcome {
                new_settlement_ids: Vec::new(),
                already_settled_clearing_ids: Vec::new(),
                message: "Settlement service not yet bound".to_string(),
                confidence,
                sources,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_duration_is_capped() {
        assert_eq!(normalise_duration(MarketEventType::Flash, 120), FLASH_MAX_DURATION_MINUTES);
    }

    #[test]
    fn base_duration_is_floored() {
        assert_eq!(normalise_duration(MarketEventType::Base, 5), BASE_MIN_DURATION_MINUTES);
    }

    #[tokio::test]
    async fn create_market_event_registers_both_outcome_legs() {
        let registry = Arc::new(OutcomeRegistry::new());
        let books = Arc::new(OrderBookStore::new());
        let backend = crate::support::memory_backend::MemoryBackend::new();
        let oracle = BaseOracleService::new("oracle-1", registry.clone(), books, backend.events());

        let event = oracle
            .create_market_event("drake", "Will Drake drop the album", MarketEventType::Base, 10)
            .await
            .unwrap();

        assert!(registry.contains(&format!("{}-yes", event.outcome_id)));
        assert!(registry.contains(&format!("{}-no", event.outcome_id)));
        assert_eq!(event.duration_minutes, BASE_MIN_DURATION_MINUTES);
        assert_eq!(oracle.get_active_events().len(), 1);
    }
}
