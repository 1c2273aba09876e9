//! In-process collection store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use korean_learner_core::types::Card;

use crate::db::error::StoreError;
use crate::db::repository::{CardStore, UserKey};

type Result<T> = std::result::Result<T, StoreError>;

/// Collections held as serialized JSON in memory.
///
/// Can be switched offline to exercise storage failures.
#[derive(Debug)]
pub struct MemoryCardStore {
    collections: Mutex<HashMap<UserKey, String>>,
    available: AtomicBool,
}

impl Default for MemoryCardStore {
    fn default() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While unavailable every operation fails with `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn collections(&self) -> Result<MutexGuard<'_, HashMap<UserKey, String>>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl CardStore for MemoryCardStore {
    fn load(&self, key: &UserKey) -> Result<Option<Vec<Card>>> {
        match self.collections()?.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &UserKey, cards: &[Card]) -> Result<()> {
        let json = serde_json::to_string(cards)?;
        self.collections()?.insert(key.clone(), json);
        Ok(())
    }

    fn reset(&self, key: &UserKey) -> Result<()> {
        self.collections()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryCardStore::new();
        let key = UserKey::for_email("minji@example.com");
        let cards = vec![Card::new(1, "책", "book")];
        store.save(&key, &cards).unwrap();
        assert_eq!(store.load(&key).unwrap(), Some(cards));
    }

    #[test]
    fn test_offline_store_fails() {
        let store = MemoryCardStore::new();
        let key = UserKey::for_email("minji@example.com");
        store.set_available(false);

        assert!(matches!(store.load(&key), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.save(&key, &[]), Err(StoreError::Unavailable(_))));

        store.set_available(true);
        assert!(store.load(&key).unwrap().is_none());
    }
}
