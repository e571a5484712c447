use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::AppError;
use crate::api::state::AppState;
use crate::domain::DomainEvent;

pub async fn get_market_audit_trail(
    State(state): State<Arc<AppState>>,
    Path(market_id): Path<String>,
) -> Result<Json<Vec<DomainEvent>>, AppError> {
    let mut events = state.events.by_market(&market_id).await?;
    events.sort_by_key(|event| event.id);
    Ok(Json(events))
}

pub async fn get_user_audit_trail(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<DomainEvent>>, AppError> {
    let mut events = state.events.by_user(&user_id).await?;
    events.sort_by_key(|event| event.id);
    Ok(Json(events))
}
