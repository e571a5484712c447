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
pub struct ResolveMarketRequest {
    pub outcome_id: String,
    pub winning_asset_type: String,
    pub settlement_account_id: Uuid,
    pub usd_per_token: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveMarketResponse {
    pub accounts_settled: usize,
    pub total_usd_paid_out: Decimal,
}

pub async fn resolve_market(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResolveMarketRequest>,
) -> Result<Json<ResolveMarketResponse>, AppError> {
    let usd_per_token = request.usd_per_token.unwrap_or(state.config.default_usd_per_token);

    let summary = state
        .market_resolver
        .resolve_market(&request.winning_asset_type, request.settlement_account_id, usd_per_token)
        .await?;

    Ok(Json(ResolveMarketResponse {
        accounts_settled: summary.accounts_settled,
        total_usd_paid_out: summary.total_usd_paid_out,
    }))
}
