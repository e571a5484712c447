use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::AppError;
use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub follower_id: String,
    pub leader_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub follower_id: String,
    pub leader_id: String,
    pub already_following: bool,
}

pub async fn follow(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FollowRequest>,
) -> Result<Json<FollowResponse>, AppError> {
    let already_following = state.social.follow(&request.follower_id, &request.leader_id).await?;

    Ok(Json(FollowResponse {
        follower_id: request.follower_id,
        leader_id: request.leader_id,
        already_following,
    }))
}
