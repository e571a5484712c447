use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::domain::MarketEvent;
use crate::matching::types::OrderBookSnapshot;

pub async fn get_active_markets(State(state): State<Arc<AppState>>) -> Json<Vec<MarketEvent>> {
    Json(state.oracle.get_active_events())
}

pub async fn get_market_orderbook(
    State(state): State<Arc<AppState>>,
    Path(outcome_id): Path<String>,
) -> Json<OrderBookSnapshot> {
    let snapshot = match state.books.get(&outcome_id) {
        Some(book) => book.snapshot(),
        None => OrderBookSnapshot {
            outcome_id,
            bids: Vec::new(),
            asks: Vec::new(),
        },
    };
    Json(snapshot)
}
