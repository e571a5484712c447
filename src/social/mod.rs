//! `Social`: the leader→follower graph and one-hop order mirroring.
//!
//! The graph itself is process-wide in-memory state (§9 global state),
//! matching the specification's concurrency model: a concurrent multi-map,
//! written under a per-leader lock, read lock-free via a snapshot clone.
//! Optional durable persistence to the `follows` table happens alongside.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};

#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    #[error("a user cannot follow themselves")]
    SelfFollow,

    #[error("social backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for SocialError {
    fn from(err: sqlx::Error) -> Self {
        SocialError::Backend(err.to_string())
    }
}

/// Optional durable side of the follow graph. When absent, `Social` is
/// purely the in-memory adjacency map described in §5.
#[async_trait]
pub trait FollowStore: Send + Sync {
    async fn save(&self, follower_id: &str, leader_id: &str) -> Result<(), SocialError>;
    async fn remove(&self, follower_id: &str, leader_id: &str) -> Result<(), SocialError>;
}

pub struct PgFollowStore {
    pool: sqlx::PgPool,
}

impl PgFollowStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowStore for PgFollowStore {
    async fn save(&self, follower_id: &str, leader_id: &str) -> Result<(), SocialError> {
        sqlx::query(
            r#"
            INSERT INTO follows (follower_id, leader_id, created_at)
            VALUES ($1, $2, now())
            ON CONFLICT (follower_id, leader_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(leader_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, follower_id: &str, leader_id: &str) -> Result<(), SocialError> {
        sqlx::query(r#"DELETE FROM follows WHERE follower_id = $1 AND leader_id = $2"#)
            .bind(follower_id)
            .bind(leader_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// leader-id -> set of follower-ids.
pub struct Social {
    adjacency: DashMap<String, DashSet<String>>,
    store: Option<Arc<dyn FollowStore>>,
}

impl Social {
    pub fn new(store: Option<Arc<dyn FollowStore>>) -> Self {
        Self {
            adjacency: DashMap::new(),
            store,
        }
    }

    /// Rejects a self-follow; otherwise idempotently records the edge.
    /// Returns whether the follower was already following the leader.
    pub async fn follow(&self, follower_id: &str, leader_id: &str) -> Result<bool, SocialError> {
        if follower_id.eq_ignore_ascii_case(leader_id) {
            return Err(SocialError::SelfFollow);
        }

        let followers = self.adjacency.entry(leader_id.to_string()).or_default();
        let already_following = !followers.insert(follower_id.to_string());
        drop(followers);

        if let Some(store) = &self.store {
            store.save(follower_id, leader_id).await?;
        }

        Ok(already_following)
    }

    pub async fn unfollow(&self, follower_id: &str, leader_id: &str) -> Result<(), SocialError> {
        if let Some(followers) = self.adjacency.get(leader_id) {
            followers.remove(follower_id);
        }
        if let Some(store) = &self.store {
            store.remove(follower_id, leader_id).await?;
        }
        Ok(())
    }

    /// Snapshot copy of the leader's followers.
    pub fn get_followers(&self, leader_id: &str) -> Vec<String> {
        self.followers_of(leader_id)
    }

    pub fn followers_of(&self, leader_id: &str) -> Vec<String> {
        self.adjacency
            .get(leader_id)
            .map(|set| set.iter().map(|entry| entry.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let social = Social::new(None);
        let err = social.follow("alice", "alice").await.unwrap_err();
        assert!(matches!(err, SocialError::SelfFollow));
    }

    #[tokio::test]
    async fn follow_twice_reports_already_following() {
        let social = Social::new(None);
        assert!(!social.follow("alice", "leader").await.unwrap());
        assert!(social.follow("alice", "leader").await.unwrap());
    }

    #[tokio::test]
    async fn get_followers_returns_snapshot() {
        let social = Social::new(None);
        social.follow("alice", "leader").await.unwrap();
        social.follow("bob", "leader").await.unwrap();
        let mut followers = social.get_followers("leader");
        followers.sort();
        assert_eq!(followers, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[tokio::test]
    async fn unfollow_removes_the_edge() {
        let social = Social::new(None);
        social.follow("alice", "leader").await.unwrap();
        social.unfollow("alice", "leader").await.unwrap();
        assert!(social.get_followers("leader").is_empty());
    }
}
