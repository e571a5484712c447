use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTradeRequest {
    pub operator_id: Option<String>,
    pub amount: Decimal,
    pub outcome_id: String,
    pub outcome_name: Option<String>,
    pub actor_id: Option<String>,
}

const DEFAULT_OPERATOR_ID: &str = "mm-provider";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTradeResponse {
    pub trade_id: Uuid,
    pub operator_id: String,
    pub amount: Decimal,
    pub outcome_id: String,
    pub outcome_name: String,
    pub actor_id: Option<String>,
    pub clearing_transaction_id: Option<Uuid>,
    pub phase: &'static str,
}

pub async fn simulate_trade(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateTradeRequest>,
) -> Result<Json<SimulateTradeResponse>, AppError> {
    let operator_id = request.operator_id.unwrap_or_else(|| DEFAULT_OPERATOR_ID.to_string());
    let outcome_name = request.outcome_name.clone().unwrap_or_else(|| request.outcome_id.clone());

    let signal = state
        .oracle
        .simulate_trade(&operator_id, request.amount, &request.outcome_id, &outcome_name, request.actor_id)
        .await?;

    let clearing_transaction_id = state
        .copy_trading
        .get_last_clearing_transaction_id_for_outcome(&signal.outcome_id)
        .await;

    Ok(Json(SimulateTradeResponse {
        trade_id: signal.trade_id,
        operator_id: signal.operator_id,
        amount: signal.amount,
        outcome_id: signal.outcome_id,
        outcome_name: signal.outcome_name,
        actor_id: signal.actor_id,
        clearing_transaction_id,
        phase: "Clearing",
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeReachedRequest {
    pub outcome_id: String,
    pub confidence_score: Option<f64>,
    pub source_verification_list: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    pub new_settlement_ids: Vec<Uuid>,
    pub already_settled_clearing_ids: Vec<Uuid>,
    pub message: String,
}

pub async fn outcome_reached(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OutcomeReachedRequest>,
) -> Result<Json<SettlementResponse>, AppError> {
    let outcome = state
        .oracle
        .notify_outcome_reached(&request.outcome_id, request.confidence_score, request.source_verification_list)
        .await?;

    Ok(Json(SettlementResponse {
        new_settlement_ids: outcome.new_settlement_ids,
        already_settled_clearing_ids: outcome.already_settled_clearing_ids,
        message: outcome.message,
    }))
}
