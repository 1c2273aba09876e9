//! Per-user collection loading and persistence.
//!
//! Store calls are blocking, so they run on the blocking thread pool.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use korean_learner_core::types::Card;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::db::{CardStore, StoreError, UserKey};

async fn run_blocking<T, F>(store: &Arc<dyn CardStore>, f: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&dyn CardStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| StoreError::Unavailable(format!("storage task failed: {}", e)))?
}

/// Stored collection for `key`, or a fresh copy of the seed deck.
pub async fn load_collection(
    store: &Arc<dyn CardStore>,
    key: &UserKey,
    seed: &Arc<Vec<Card>>,
) -> Result<Vec<Card>, StoreError> {
    let owned_key = key.clone();
    match run_blocking(store, move |s| s.load(&owned_key)).await? {
        Some(cards) => Ok(cards),
        None => {
            tracing::debug!(user = key.as_str(), "no stored collection, using seed deck");
            Ok(Vec::clone(seed))
        }
    }
}

pub async fn save_collection(store: &Arc<dyn CardStore>, key: &UserKey, cards: Vec<Card>) -> Result<(), StoreError> {
    let count = cards.len();
    let owned_key = key.clone();
    run_blocking(store, move |s| s.save(&owned_key, &cards)).await?;
    tracing::info!(user = key.as_str(), cards = count, "saved collection");
    Ok(())
}

pub async fn reset_collection(store: &Arc<dyn CardStore>, key: &UserKey) -> Result<(), StoreError> {
    let owned_key = key.clone();
    run_blocking(store, move |s| s.reset(&owned_key)).await
}

/// One async lock per user, held across a collection's read-modify-write.
#[derive(Default)]
pub struct CollectionLocks {
    locks: Mutex<HashMap<UserKey, Arc<AsyncMutex<()>>>>,
}

impl CollectionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &UserKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }
}
