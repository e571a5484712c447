//! A per-key async mutex, built on top of `dashmap`.
//!
//! Several components need "one creator wins" semantics keyed by a string
//! (outcome-id, operator-id, …): the market-holding-account creator in
//! `CopyTradingEngine`, the per-outcome clearing-index append in the same
//! component, and the per-outcome book critical section in `matching`. This
//! wraps the common piece: a lazily-created `tokio::sync::Mutex` per key,
//! stored in a concurrent map so distinct keys never contend.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub struct KeyedAsyncMutex<K> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K> Default for KeyedAsyncMutex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> KeyedAsyncMutex<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the lock for `key`, creating it on first use. Holding the
    /// returned guard serialises every other caller using the same key;
    /// callers using a different key never block on each other.
    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let entry = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        entry.lock_owned().await
    }
}
