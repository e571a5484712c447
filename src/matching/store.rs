//! `OrderBookStore`: a concurrent map from outcome-id to its `OrderBook`,
//! with a race-free `get_or_create`.

use std::sync::Arc;

use dashmap::DashMap;

use super::orderbook::OrderBook;

#[derive(Default)]
pub struct OrderBookStore {
    books: DashMap<String, Arc<OrderBook>>,
}

impl OrderBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, outcome_id: &str) -> Arc<OrderBook> {
        self.books
            .entry(outcome_id.to_string())
            .or_insert_with(|| Arc::new(OrderBook::new(outcome_id)))
            .clone()
    }

    pub fn get(&self, outcome_id: &str) -> Option<Arc<OrderBook>> {
        self.books.get(outcome_id).map(|entry| entry.clone())
    }
}
