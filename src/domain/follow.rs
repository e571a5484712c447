use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One edge of the leader→follower graph.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub follower_id: String,
    pub leader_id: String,
    pub created_at: DateTime<Utc>,
}
