use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::AppError;
use crate::api::state::AppState;
use crate::domain::{AccountType, Phase};
use crate::ids::resolve_operator_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub operator_id: String,
    pub name: String,
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub id: Uuid,
    pub name: String,
    pub operator_id: String,
}

pub async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateWalletRequest>,
) -> Result<(StatusCode, Json<WalletResponse>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be blank"));
    }

    let operator_id = resolve_operator_id(&request.operator_id).to_string();

    let account = state
        .ledger
        .create_account(request.id, &request.name, AccountType::Asset, &operator_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WalletResponse {
            id: account.id,
            name: account.name,
            operator_id: account.operator_id,
        }),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub account_id: Uuid,
    pub balance: Decimal,
    pub phase: &'static str,
}

pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BalanceResponse>, AppError> {
    let balance = state.ledger.account_balance(id, Some(Phase::Clearing)).await?;
    Ok(Json(BalanceResponse {
        account_id: id,
        balance,
        phase: "Clearing",
    }))
}
