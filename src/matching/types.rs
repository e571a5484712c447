use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Order;

/// One fill produced by `OrderBook::match_orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub price: Decimal,
    pub quantity: Decimal,
    pub buyer_user_id: String,
    pub seller_user_id: String,
}

/// Result of `MatchingEngine::process_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOrderResult {
    pub order_id: Uuid,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLevel {
    pub order_id: Uuid,
    pub user_id: String,
    pub operator_id: Option<String>,
    pub price: Decimal,
    pub quantity: Decimal,
}

impl From<&Order> for BookLevel {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id.clone(),
            operator_id: order.operator_id.clone(),
            price: order.price,
            quantity: order.remaining_quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookSnapshot {
    pub outcome_id: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}
