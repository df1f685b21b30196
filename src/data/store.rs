//! Async record store interface

use async_trait::async_trait;
use thiserror::Error;

use super::database::DatabaseError;
use super::models::{CommandResult, RecordKey, RecordQueryResult};
use crate::state::Record;

/// Storage-layer fault.
///
/// Never crosses the [`RecordStore`] boundary: stores translate it into an
/// unsuccessful outcome.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Simulated storage failure")]
    Simulated,
}

/// Asynchronous load/save of records by key.
///
/// Both operations report every failure through their outcome value and never
/// return an error or panic on storage faults.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Persist `record` under `key`. A `None` record is a successful no-op.
    async fn save(&self, key: &RecordKey, record: Option<&R>) -> CommandResult;

    /// Retrieve the record stored under `key`
    async fn load(&self, key: &RecordKey) -> RecordQueryResult<R>;
}

pub(crate) fn not_found<R>(key: &RecordKey) -> RecordQueryResult<R> {
    tracing::debug!(key = %key, "No record stored");
    RecordQueryResult::failure(format!("Failed to retrieve a value for {}", key))
}

pub(crate) fn load_failed<R>(key: &RecordKey, error: &StoreError) -> RecordQueryResult<R> {
    tracing::warn!(key = %key, error = %error, "Failed to load record");
    RecordQueryResult::failure(format!("Failed to retrieve a value for {}: {}", key, error))
}

pub(crate) fn save_failed(key: &RecordKey, error: &StoreError) -> CommandResult {
    tracing::warn!(key = %key, error = %error, "Failed to save record");
    CommandResult::failure(format!("Failed to save a value for {}: {}", key, error))
}
