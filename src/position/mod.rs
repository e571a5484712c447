//! `PositionService::GetNetPosition`: aggregates a user's `TradeMatched`
//! events into a net position per outcome.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::domain::TradeMatchedPayload;
use crate::events::EventStorePort;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomePosition {
    pub outcome_id: String,
    pub net_quantity: Decimal,
}

pub struct PositionService {
    events: Arc<dyn EventStorePort>,
}

impl PositionService {
    pub fn new(events: Arc<dyn EventStorePort>) -> Self {
        Self { events }
    }

    /// Skips unparseable payloads (logged); a fully failed scan returns an
    /// empty list rather than propagating an error, matching the
    /// log-and-continue behaviour the rest of this read path follows.
    pub async fn get_net_position(&self, user_id: &str) -> Vec<OutcomePosition> {
        let events = match self.events.by_user(user_id).await {
            Ok(events) => events,
            Err(err) => {
                warn!(user_id, error = %err, "failed to scan domain events for net position");
                return Vec::new();
            }
        };

        let mut net_by_outcome: BTreeMap<String, Decimal> = BTreeMap::new();

        for event in events.iter().filter(|event| event.event_type == "TradeMatched") {
            let payload: TradeMatchedPayload = match serde_json::from_value(event.payload.clone()) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(user_id, event_id = event.id, error = %err, "skipping unparseable TradeMatched payload");
                    continue;
                }
            };

            let signed_quantity = if payload.buyer_user_id == user_id {
                payload.quantity
            } else if payload.seller_user_id == user_id {
                -payload.quantity
            } else {
                continue;
            };

            *net_by_outcome.entry(payload.outcome_id).or_insert(Decimal::ZERO) += signed_quantity;
        }

        net_by_outcome
            .into_iter()
            .filter(|(_, quantity)| *quantity != Decimal::ZERO)
            .map(|(outcome_id, net_quantity)| OutcomePosition { outcome_id, net_quantity })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewDomainEvent;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn aggregates_buys_and_sells_per_outcome() {
        let backend = crate::support::memory_backend::MemoryBackend::new();
        let events = backend.events();

        events
            .append(NewDomainEvent::new(
                "TradeMatched",
                json!(TradeMatchedPayload {
                    price: dec!(0.60),
                    quantity: dec!(10),
                    buyer_user_id: "alice".to_string(),
                    seller_user_id: "bob".to_string(),
                    outcome_id: "drake-album-yes".to_string(),
                }),
                Some("drake-album-yes".to_string()),
                Some("alice".to_string()),
            ))
            .await
            .unwrap();
        events
            .append(NewDomainEvent::new(
                "TradeMatched",
                json!(TradeMatchedPayload {
                    price: dec!(0.60),
                    quantity: dec!(4),
                    buyer_user_id: "bob".to_string(),
                    seller_user_id: "alice".to_string(),
                    outcome_id: "drake-album-yes".to_string(),
                }),
                Some("drake-album-yes".to_string()),
                Some("alice".to_string()),
            ))
            .await
            .unwrap();

        let service = PositionService::new(events);
        let positions = service.get_net_position("alice").await;
        assert_eq!(
            positions,
            vec![OutcomePosition { outcome_id: "drake-album-yes".to_string(), net_quantity: dec!(6) }]
        );
    }

    #[tokio::test]
    async fn zero_net_position_is_omitted() {
        let backend = crate::support::memory_backend::MemoryBackend::new();
        let events = backend.events();

        events
            .append(NewDomainEvent::new(
                "TradeMatched",
                json!(TradeMatchedPayload {
                    price: dec!(0.60),
                    quantity: dec!(5),
                    buyer_user_id: "alice".to_string(),
                    seller_user_id: "bob".to_string(),
                    outcome_id: "drake-album-yes".to_string(),
                }),
                Some("drake-album-yes".to_string()),
                Some("alice".to_string()),
            ))
            .await
            .unwrap();
        events
            .append(NewDomainEvent::new(
                "TradeMatched",
                json!(TradeMatchedPayload {
                    price: dec!(0.60),
                    quantity: dec!(5),
                    buyer_user_id: "bob".to_string(),
                    seller_user_id: "alice".to_string(),
                    outcome_id: "drake-album-yes".to_string(),
                }),
                Some("drake-album-yes".to_string()),
                Some("alice".to_string()),
            ))
            .await
            .unwrap();

        let service = PositionService::new(events);
        assert!(service.get_net_position("alice").await.is_empty());
    }
}
