//! Per-outcome limit order book: price-time priority matching.
//!
//! Grounded in this codebase's original matching-engine orderbook: one
//! `RwLock`-guarded sequence per side, an in-order match loop, and an
//! operator-scoped bulk cancel. The sequence here is a plain `Vec` kept
//! sorted by a stable sort after every insert, matching the book-maintenance
//! contract literally (append, then re-sort so best price is index 0)
//! rather than a tree structure — simpler, and fast enough at the scale a
//! single outcome's book sees.

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::domain::{Order, Side};

use super::types::{BookLevel, MatchResult, OrderBookSnapshot};

pub struct OrderBook {
    outcome_id: String,
    bids: RwLock<Vec<Order>>,
    asks: RwLock<Vec<Order>>,
}

impl OrderBook {
    pub fn new(outcome_id: impl Into<String>) -> Self {
        Self {
            outcome_id: outcome_id.into(),
            bids: RwLock::new(Vec::new()),
            asks: RwLock::new(Vec::new()),
        }
    }

    pub fn outcome_id(&self) -> &str {
        &self.outcome_id
    }

    /// Appends to the order's side and re-sorts (stable, so arrival order
    /// breaks ties): bids price descending, asks price ascending.
    pub fn add_order(&self, order: Order) {
        match order.side {
            Side::Bid => {
                let mut bids = self.bids.write();
                bids.push(order);
                bids.sort_by(|a, b| b.price.cmp(&a.price));
            }
            Side::Ask => {
                let mut asks = self.asks.write();
                asks.push(order);
                asks.sort_by(|a, b| a.price.cmp(&b.price));
            }
        }
    }

    /// Runs the maker/taker loop while the book is crossed. Fill price is
    /// always the resting ask's price (the simplification this system uses;
    /// see design notes on time-priority maker selection).
    pub fn match_orders(&self) -> Vec<MatchResult> {
        let mut results = Vec::new();
        let mut bids = self.bids.write();
        let mut asks = self.asks.write();

        loop {
            let (Some(best_bid), Some(best_ask)) = (bids.first(), asks.first()) else {
                break;
            };
            if best_bid.price < best_ask.price {
                break;
            }

            let quantity = best_bid.remaining_quantity.min(best_ask.remaining_quantity);
            let price = best_ask.price;
            let buyer_user_id = best_bid.user_id.clone();
            let seller_user_id = best_ask.user_id.clone();

            bids[0].remaining_quantity -= quantity;
            asks[0].remaining_quantity -= quantity;

            results.push(MatchResult {
                price,
                quantity,
                buyer_user_id,
                seller_user_id,
            });

            if bids[0].remaining_quantity == Decimal::ZERO {
                bids.remove(0);
            }
            if asks[0].remaining_quantity == Decimal::ZERO {
                asks.remove(0);
            }
        }

        results
    }

    /// Removes every resting order on either side whose operator-id
    /// matches, case-insensitively. Returns the count removed.
    pub fn remove_orders_by_operator(&self, operator_id: &str) -> usize {
        let target = operator_id.to_ascii_lowercase();
        let matches = |order: &Order| {
            order
                .operator_id
                .as_deref()
                .map(|id| id.to_ascii_lowercase() == target)
                .unwrap_or(false)
        };

        let mut removed = 0;
        let mut bids = self.bids.write();
        let before = bids.len();
        bids.retain(|o| !matches(o));
        removed += before - bids.len();

        let mut asks = self.asks.write();
        let before = asks.len();
        asks.retain(|o| !matches(o));
        removed += before - asks.len();

        removed
    }

    pub fn best_bid_price(&self) -> Option<Decimal> {
        self.bids.read().first().map(|o| o.price)
    }

    pub fn best_ask_price(&self) -> Option<Decimal> {
        self.asks.read().first().map(|o| o.price)
    }

    pub fn is_crossed(&self) -> bool {
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    pub fn snapshot(&self) -> OrderBookSnapshot {
        OrderBookSnapshot {
            outcome_id: self.outcome_id.clone(),
            bids: self.bids.read().iter().map(BookLevel::from).collect(),
            asks: self.asks.read().iter().map(BookLevel::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.read().is_empty() && self.asks.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(user: &str, side: Side, price: Decimal, qty: Decimal) -> Order {
        Order::new(user, "outcome-x", None, side, price, qty)
    }

    #[test]
    fn basic_match_fills_at_ask_price() {
        let book = OrderBook::new("outcome-x");
        book.add_order(order("buyer", Side::Bid, dec!(0.60), dec!(10)));
        book.add_order(order("seller", Side::Ask, dec!(0.50), dec!(10)));

        let matches = book.match_orders();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].price, dec!(0.50));
        assert_eq!(matches[0].quantity, dec!(10));
        assert_eq!(matches[0].buyer_user_id, "buyer");
        assert_eq!(matches[0].seller_user_id, "seller");
        assert!(book.is_empty());
    }

    #[test]
    fn partial_fill_walks_price_priority() {
        let book = OrderBook::new("outcome-x");
        book.add_order(order("s_high", Side::Ask, dec!(0.70), dec!(10)));
        book.add_order(order("s_low", Side::Ask, dec!(0.50), dec!(10)));
        book.add_order(order("s_mid", Side::Ask, dec!(0.60), dec!(10)));
        book.add_order(order("b", Side::Bid, dec!(0.75), dec!(30)));

        let matches = book.match_orders();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].price, dec!(0.50));
        assert_eq!(matches[0].seller_user_id, "s_low");
        assert_eq!(matches[1].price, dec!(0.60));
        assert_eq!(matches[1].seller_user_id, "s_mid");
        assert_eq!(matches[2].price, dec!(0.70));
        assert_eq!(matches[2].seller_user_id, "s_high");
        assert!(book.is_empty());
    }

    #[test]
    fn no_match_when_book_not_crossed() {
        let book = OrderBook::new("outcome-x");
        book.add_order(order("buyer", Side::Bid, dec!(0.40), dec!(10)));
        book.add_order(order("seller", Side::Ask, dec!(0.50), dec!(10)));

        assert!(book.match_orders().is_empty());
        assert!(!book.is_crossed());
    }

    #[test]
    fn remove_orders_by_operator_is_case_insensitive() {
        let book = OrderBook::new("outcome-x");
        let mut bid = order("buyer", Side::Bid, dec!(0.40), dec!(10));
        bid.operator_id = Some("MM-Provider".to_string());
        book.add_order(bid);
        book.add_order(order("other", Side::Bid, dec!(0.35), dec!(5)));

        let removed = book.remove_orders_by_operator("mm-provider");
        assert_eq!(removed, 1);
        assert_eq!(book.best_bid_price(), Some(dec!(0.35)));
    }

    #[test]
    fn residual_quantity_remains_on_larger_resting_order() {
        let book = OrderBook::new("outcome-x");
        book.add_order(order("seller", Side::Ask, dec!(0.50), dec!(150)));
        book.add_order(order("leader", Side::Bid, dec!(0.50), dec!(50)));

        let matches = book.match_orders();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].quantity, dec!(50));
        assert_eq!(book.best_ask_price(), Some(dec!(0.50)));
    }
}
