use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::AppError;
use crate::api::state::AppState;
use crate::domain::{Order, Side};
use crate::matching::types::MatchResult;
use crate::matching::MatchingEngine;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderQuery {
    pub market_id: String,
    pub price: rust_decimal::Decimal,
    pub quantity: rust_decimal::Decimal,
    pub side: String,
    pub operator_id: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    pub order_id: uuid::Uuid,
    pub matches: Vec<MatchResult>,
}

async fn submit_order(state: &AppState, request: SubmitOrderQuery) -> Result<SubmitOrderResponse, AppError> {
    let side = Side::parse(&request.side)
        .ok_or_else(|| AppError::bad_request(format!("unrecognised side: {}", request.side)))?;

    MatchingEngine::validate_order_terms(request.price, request.quantity)?;

    let order = Order::new(
        request.user_id,
        request.market_id,
        request.operator_id,
        side,
        request.price,
        request.quantity,
    );

    let result = state.matching_engine.process_order(order).await?;

    Ok(SubmitOrderResponse {
        order_id: result.order_id,
        matches: result.matches,
    })
}

pub async fn place_order(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SubmitOrderQuery>,
) -> Result<Json<SubmitOrderResponse>, AppError> {
    Ok(Json(submit_order(&state, request).await?))
}

#[derive(Debug, Deserialize)]
pub struct BulkOrderRequest {
    pub orders: Vec<SubmitOrderQuery>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrderResult {
    pub order_id: Option<uuid::Uuid>,
    pub matches: Vec<MatchResult>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkOrderResponse {
    pub results: Vec<BulkOrderResult>,
}

const MARKET_MAKER_OPERATOR_ID: &str = "mm-provider";

pub async fn place_bulk_orders(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkOrderRequest>,
) -> Result<Json<BulkOrderResponse>, AppError> {
    for order in &request.orders {
        if order.operator_id.as_deref() != Some(MARKET_MAKER_OPERATOR_ID) {
            return Err(AppError::bad_request(format!(
                "bulk order submission requires operatorId {MARKET_MAKER_OPERATOR_ID:?}"
            )));
        }
    }

    let mut results = Vec::with_capacity(request.orders.len());
    for order in request.orders {
        match submit_order(&state, order).await {
            Ok(response) => results.push(BulkOrderResult {
                order_id: Some(response.order_id),
                matches: response.matches,
                error: None,
            }),
            Err(err) => results.push(BulkOrderResult {
                order_id: None,
                matches: Vec::new(),
                error: Some(err.message),
            }),
        }
    }

    Ok(Json(BulkOrderResponse { results }))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(market_id): Path<String>,
) -> Json<crate::matching::types::OrderBookSnapshot> {
    let snapshot = match state.books.get(&market_id) {
        Some(book) => book.snapshot(),
        None => crate::matching::types::OrderBookSnapshot {
            outcome_id: market_id,
            bids: Vec::new(),
            asks: Vec::new(),
        },
    };
    Json(snapshot)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrdersResponse {
    pub market_id: String,
    pub operator_id: String,
    pub cancelled_count: usize,
}

pub async fn cancel_orders_by_operator(
    State(state): State<Arc<AppState>>,
    Path((market_id, operator_id)): Path<(String, String)>,
) -> Result<Json<CancelOrdersResponse>, AppError> {
    let book = state
        .books
        .get(&market_id)
        .ok_or_else(|| AppError::not_found(format!("no order book for market {market_id}")))?;

    let cancelled_count = book.remove_orders_by_operator(&operator_id);
    if cancelled_count == 0 {
        return Err(AppError::not_found(format!(
            "no resting orders for operator {operator_id} in market {market_id}"
        )));
    }

    Ok(Json(CancelOrdersResponse {
        market_id,
        operator_id,
        cancelled_count,
    }))
}
