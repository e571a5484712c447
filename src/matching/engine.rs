//! `MatchingEngine::process_order` — the one atomic action described in
//! §4.M: validate against the outcome registry, add to the book, match,
//! clear each fill into the ledger, append domain events, then mirror to
//! followers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::{NewDomainEvent, Order, OrderPlacedPayload, TradeMatchedPayload};
use crate::events::EventStorePort;
use crate::ledger::LedgerPort;
use crate::outcome_ledger::resolver::resolve_asset_type;
use crate::social::Social;

use super::clearing::{ClearingPort, TradeToClear};
use super::registry::OutcomeRegistry;
use super::store::OrderBookStore;
use super::types::{ProcessOrderResult, MatchResult};
use super::MatchingError;

pub struct MatchingEngine {
    books: Arc<OrderBookStore>,
    outcome_registry: Option<Arc<OutcomeRegistry>>,
    ledger: Arc<dyn LedgerPort>,
    clearing: Arc<dyn ClearingPort>,
    events: Arc<dyn EventStorePort>,
    social: Arc<Social>,
}

impl MatchingEngine {
    pub fn new(
        books: Arc<OrderBookStore>,
        outcome_registry: Option<Arc<OutcomeRegistry>>,
        ledger: Arc<dyn LedgerPort>,
        clearing: Arc<dyn ClearingPort>,
        events: Arc<dyn EventStorePort>,
        social: Arc<Social>,
    ) -> Self {
        Self {
            books,
            outcome_registry,
            ledger,
            clearing,
            events,
            social,
        }
    }

    pub fn books(&self) -> &OrderBookStore {
        &self.books
    }

    /// Validates price/quantity the way the HTTP boundary does before
    /// accepting an order: price within [0.00, 1.00], quantity positive.
    pub fn validate_order_terms(price: Decimal, quantity: Decimal) -> Result<(), MatchingError> {
        if price < Decimal::ZERO || price > Decimal::ONE {
            return Err(MatchingError::PriceOutOfRange);
        }
        if quantity <= Decimal::ZERO {
            return Err(MatchingError::NonPositiveQuantity);
        }
        Ok(())
    }

    /// Boxed because mirrored orders recurse into this same method with the
    /// mirror flag set; an unboxed `async fn` cannot reference itself.
    pub fn process_order<'a>(
        &'a self,
        order: Order,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOrderResult, MatchingError>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(registry) = &self.outcome_registry {
                if !registry.contains(&order.outcome_id) {
                    return Err(MatchingError::InvalidOutcome(order.outcome_id.clone()));
                }
            }

            let order_id = order.id;
            let outcome_id = order.outcome_id.clone();
            let user_id = order.user_id.clone();
            let is_mirror = order.is_mirror;

            let book = self.books.get_or_create(&outcome_id);
            book.add_order(order.clone());
            crate::metrics::record_order_submitted(if order.side == crate::domain::Side::Bid { "bid" } else { "ask" });

            self.events
                .append(NewDomainEvent::new(
                    "OrderPlaced",
                    json!(OrderPlacedPayload {
                        order_id,
                        user_id: user_id.clone(),
                        outcome_id: outcome_id.clone(),
                        side: order.side,
                        price: order.price,
                        quantity: order.remaining_quantity,
                    }),
                    Some(outcome_id.clone()),
                    Some(user_id.clone()),
                ))
                .await?;

            let fills = book.match_orders();

            let mut matches = Vec::with_capacity(fills.len());
            for fill in &fills {
                self.clear_one_match(&outcome_id, fill).await?;
                matches.push(fill.clone());
                self.append_trade_matched(&outcome_id, fill).await?;
                crate::metrics::record_trade_matched();
            }

            if !is_mirror {
                let followers = self.social.followers_of(&user_id);
                for follower in followers {
                    let mirrored = order.mirrored_for(&follower);
                    self.process_order(mirrored).await?;
                }
            }

            Ok(ProcessOrderResult { order_id, matches })
        })
    }

    async fn clear_one_match(&self, outcome_id: &str, fill: &MatchResult) -> Result<(), MatchingError> {
        let buyer = self
            .ledger
            .find_account_for_user(&fill.buyer_user_id)
            .await?
            .ok_or_else(|| MatchingError::InvalidOperation("buyer has no account".to_string()))?;
        let seller = self
            .ledger
            .find_account_for_user(&fill.seller_user_id)
            .await?
            .ok_or_else(|| MatchingError::InvalidOperation("seller has no account".to_string()))?;

        let trade = TradeToClear {
            buyer_account_id: buyer.id,
            seller_account_id: seller.id,
            price: fill.price,
            quantity: fill.quantity,
            outcome_asset_type: resolve_asset_type(outcome_id),
        };

        self.clearing.clear_trade(&trade).await?;
        Ok(())
    }

    async fn append_trade_matched(&self, outcome_id: &str, fill: &MatchResult) -> Result<(), MatchingError> {
        let payload = json!(TradeMatchedPayload {
            price: fill.price,
            quantity: fill.quantity,
            buyer_user_id: fill.buyer_user_id.clone(),
            seller_user_id: fill.seller_user_id.clone(),
            outcome_id: outcome_id.to_string(),
        });

        self.events
            .append_many(vec![
                NewDomainEvent::new("TradeMatched", payload.clone(), Some(outcome_id.to_string()), Some(fill.buyer_user_id.clone())),
                NewDomainEvent::new("TradeMatched", payload, Some(outcome_id.to_string()), Some(fill.seller_user_id.clone())),
            ])
            .await?;
        Ok(())
    }
}
