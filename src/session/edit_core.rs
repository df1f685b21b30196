//! Record store selection and shared infrastructure for editing sessions.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::EditSession;
use crate::config::{Config, StoreBackend};
use crate::data::{
    CommandResult, Database, MemoryRecordStore, RecordKey, RecordQueryResult, RecordStore,
    SqliteRecordStore, StoreError,
};
use crate::state::Record;

enum Backend {
    Memory(MemoryRecordStore),
    Sqlite {
        /// Database connection (owned to keep connection alive)
        _database: Database,
        store: SqliteRecordStore,
    },
}

/// Shared infrastructure for applications editing stored records.
///
/// Owns the configuration and the record store selected by it. When the
/// configured SQLite database cannot be opened, records are kept in memory
/// for the rest of the process.
pub struct EditCore {
    /// Application configuration
    config: Config,
    backend: Backend,
}

impl EditCore {
    /// Create a new EditCore with the given configuration
    pub fn new(config: Config) -> Self {
        let backend = match config.backend {
            StoreBackend::Memory => Backend::Memory(MemoryRecordStore::new()),
            StoreBackend::Sqlite => match Database::open(config.database_path.clone()) {
                Ok(database) => {
                    let store = SqliteRecordStore::new(database.connection());
                    Backend::Sqlite {
                        _database: database,
                        store,
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %config.database_path.display(),
                        error = %e,
                        "Failed to open database; records will not persist"
                    );
                    Backend::Memory(MemoryRecordStore::new())
                }
            },
        };

        Self { config, backend }
    }

    /// Get the application configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether records survive the process
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Sqlite { .. })
    }

    /// Whether anything is stored under `key`, regardless of whether it decodes
    pub fn contains(&self, key: &RecordKey) -> Result<bool, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.contains(key)),
            Backend::Sqlite { store, .. } => Ok(store.get(key)?.is_some()),
        }
    }

    /// Remove the record stored under `key`. Returns whether one existed.
    pub fn delete(&self, key: &RecordKey) -> Result<bool, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.delete(key)),
            Backend::Sqlite { store, .. } => store.delete(key),
        }
    }

    /// Open an editing session for `key` (the configured default key when
    /// `None`), loading the stored record or `fallback`.
    pub async fn session<R>(
        self: &Arc<Self>,
        key: Option<RecordKey>,
        fallback: R,
    ) -> EditSession<R, EditCore>
    where
        R: Record + Serialize + DeserializeOwned,
    {
        let key = key.unwrap_or_else(|| self.config.default_key.clone());
        EditSession::open(key, self.clone(), fallback).await
    }
}

#[async_trait]
impl<R> RecordStore<R> for EditCore
where
    R: Record + Serialize + DeserializeOwned,
{
    async fn save(&self, key: &RecordKey, record: Option<&R>) -> CommandResult {
        match &self.backend {
            Backend::Memory(store) => store.save(key, record).await,
            Backend::Sqlite { store, .. } => store.save(key, record).await,
        }
    }

    async fn load(&self, key: &RecordKey) -> RecordQueryResult<R> {
        match &self.backend {
            Backend::Memory(store) => store.load(key).await,
            Backend::Sqlite { store, .. } => store.load(key).await,
        }
    }
}
