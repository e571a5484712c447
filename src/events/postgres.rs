use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::{DomainEvent, NewDomainEvent};

use super::{EventStoreError, EventStorePort};

/// Postgres-backed domain-event store. Owns the `domain_events` table
/// (`id bigserial` gives the monotone ordering audit queries rely on).
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStorePort for PgEventStore {
    async fn append(&self, event: NewDomainEvent) -> Result<DomainEvent, EventStoreError> {
        let occurred_at = Utc::now();
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO domain_events (event_type, payload, occurred_at, market_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&event.event_type)
        .bind(&event.payload)
        .bind(occurred_at)
        .bind(&event.market_id)
        .bind(&event.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(DomainEvent {
            id: row.0,
            event_type: event.event_type,
            payload: event.payload,
            occurred_at,
            market_id: event.market_id,
            user_id: event.user_id,
        })
    }

    async fn append_many(&self, events: Vec<NewDomainEvent>) -> Result<Vec<DomainEvent>, EventStoreError> {
        let mut persisted = Vec::with_capacity(events.len());
        for event in events {
            persisted.push(self.append(event).await?);
        }
        Ok(persisted)
    }

    async fn by_market(&self, market_id: &str) -> Result<Vec<DomainEvent>, EventStoreError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, event_type, payload, occurred_at, market_id, user_id
            FROM domain_events
            WHERE market_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(market_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<DomainEvent>, EventStoreError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, event_type, payload, occurred_at, market_id, user_id
            FROM domain_events
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
