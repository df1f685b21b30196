//! SQLite-backed record store (key-value table)

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::database::DatabaseError;
use super::models::{CommandResult, RecordKey, RecordQueryResult};
use super::store::{load_failed, not_found, save_failed, RecordStore, StoreError};
use crate::state::Record;

/// Record store persisting JSON-encoded records in the `records` table
#[derive(Clone)]
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// Create a new SqliteRecordStore
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Set a raw value (insert or update)
    pub fn set(&self, key: &RecordKey, value: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO records (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key.as_str(), value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get a raw value by key
    pub fn get(&self, key: &RecordKey) -> Result<Option<String>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM records WHERE key = ?1")?;
        let mut rows = stmt.query(params![key.as_str()])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Delete a record. Returns whether a row was removed.
    pub fn delete(&self, key: &RecordKey) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM records WHERE key = ?1", params![key.as_str()])?;
        Ok(removed > 0)
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Result<Vec<RecordKey>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key FROM records ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys.into_iter().map(RecordKey::from).collect())
    }

    /// Clear all records
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM records", [])?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database(DatabaseError::LockPoisoned))
    }

    async fn write(&self, key: &RecordKey, value: String) -> Result<(), StoreError> {
        let store = self.clone();
        let key = key.clone();
        tokio::task::spawn_blocking(move || store.set(&key, &value)).await?
    }

    async fn read(&self, key: &RecordKey) -> Result<Option<String>, StoreError> {
        let store = self.clone();
        let key = key.clone();
        tokio::task::spawn_blocking(move || store.get(&key)).await?
    }
}

impl std::fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl<R> RecordStore<R> for SqliteRecordStore
where
    R: Record + Serialize + DeserializeOwned,
{
    async fn save(&self, key: &RecordKey, record: Option<&R>) -> CommandResult {
        let Some(record) = record else {
            return CommandResult::success();
        };

        let value = match serde_json::to_string(record) {
            Ok(value) => value,
            Err(e) => return save_failed(key, &e.into()),
        };

        match self.write(key, value).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Saved record");
                CommandResult::success()
            }
            Err(e) => save_failed(key, &e),
        }
    }

    async fn load(&self, key: &RecordKey) -> RecordQueryResult<R> {
        let value = match self.read(key).await {
            Ok(Some(value)) => value,
            Ok(None) => return not_found(key),
            Err(e) => return load_failed(key, &e),
        };

        match serde_json::from_str(&value) {
            Ok(record) => RecordQueryResult::success(record),
            Err(e) => load_failed(key, &e.into()),
        }
    }
}
