//! Repository pattern for collection storage.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use korean_learner_core::types::Card;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::error::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// Storage key for one user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserKey(String);

impl UserKey {
    /// Format: `cards_{email}`
    pub fn for_email(email: &str) -> Self {
        Self(format!("cards_{}", email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key-value store of card collections.
pub trait CardStore: Send + Sync {
    /// Stored collection, or `None` if the user has never saved one.
    fn load(&self, key: &UserKey) -> Result<Option<Vec<Card>>>;
    fn save(&self, key: &UserKey, cards: &[Card]) -> Result<()>;
    /// Remove the stored collection.
    fn reset(&self, key: &UserKey) -> Result<()>;
}

/// SQLite implementation of the collection store.
pub struct SqliteCardStore {
    conn: Mutex<Connection>,
}

impl SqliteCardStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(super::schema::SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }
}

impl CardStore for SqliteCardStore {
    fn load(&self, key: &UserKey) -> Result<Option<Vec<Card>>> {
        let raw: Option<String> = self
            .conn()?
            .query_row(
                "SELECT cards_json FROM card_collections WHERE user_key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|json| serde_json::from_str::<Vec<Card>>(&json))
            .transpose()
            .map_err(Into::into)
    }

    fn save(&self, key: &UserKey, cards: &[Card]) -> Result<()> {
        let json = serde_json::to_string(cards)?;
        self.conn()?.execute(
            "INSERT INTO card_collections (user_key, cards_json, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_key) DO UPDATE SET cards_json = excluded.cards_json, updated_at = excluded.updated_at",
            params![key.as_str(), json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn reset(&self, key: &UserKey) -> Result<()> {
        self.conn()?.execute(
            "DELETE FROM card_collections WHERE user_key = ?1",
            params![key.as_str()],
        )?;
        Ok(())
    }
}
