//! Per-outcome ordered list of Clearing transaction ids, the record
//! `AutoSettlement` later walks to find what to reverse.

use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct ClearingIndex {
    by_outcome: DashMap<String, RwLock<Vec<Uuid>>>,
}

impl ClearingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(outcome_id: &str) -> String {
        outcome_id.trim().to_ascii_lowercase()
    }

    /// Appends under the outcome's own lock so concurrent signals for the
    /// same outcome never interleave and readers always see a consistent
    /// ordered list.
    pub async fn append(&self, outcome_id: &str, transaction_id: Uuid) {
        let list = self
            .by_outcome
            .entry(Self::key(outcome_id))
            .or_insert_with(|| RwLock::new(Vec::new()));
        list.write().await.push(transaction_id);
    }

    pub async fn transaction_ids_for(&self, outcome_id: &str) -> Vec<Uuid> {
        match self.by_outcome.get(&Self::key(outcome_id)) {
            Some(list) => list.read().await.clone(),
            None => Vec::new(),
        }
    }

    pub async fn last_transaction_id_for(&self, outcome_id: &str) -> Option<Uuid> {
        self.transaction_ids_for(outcome_id).await.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_preserve_order_per_outcome() {
        let index = ClearingIndex::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        index.append("Drake-Album", a).await;
        index.append("drake-album", b).await;
        assert_eq!(index.transaction_ids_for("DRAKE-ALBUM").await, vec![a, b]);
        assert_eq!(index.last_transaction_id_for("drake-album").await, Some(b));
    }

    #[tokio::test]
    async fn unknown_outcome_is_empty() {
        let index = ClearingIndex::new();
        assert!(index.transaction_ids_for("nothing").await.is_empty());
        assert_eq!(index.last_transaction_id_for("nothing").await, None);
    }
}
