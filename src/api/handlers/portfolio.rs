use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::api::state::AppState;
use crate::position::OutcomePosition;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsResponse {
    pub account_id: Uuid,
    pub holdings: std::collections::HashMap<String, Decimal>,
}

pub async fn get_holdings(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<HoldingsResponse>, AppError> {
    let holdings = state.outcome_ledger.holdings_for_account(account_id).await?;
    Ok(Json(HoldingsResponse { account_id, holdings }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPositionQuery {
    pub user_id: String,
    pub market_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPositionResponse {
    pub user_id: String,
    pub positions: Vec<OutcomePosition>,
}

pub async fn get_net_position(
    State(state): State<Arc<AppState>>,
    Query(request): Query<NetPositionQuery>,
) -> Json<NetPositionResponse> {
    let mut positions = state.position_service.get_net_position(&request.user_id).await;
    if let Some(market_id) = &request.market_id {
        positions.retain(|position| &position.outcome_id == market_id);
    }

    Json(NetPositionResponse {
        user_id: request.user_id,
        positions,
    })
}
