//! In-memory record store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{CommandResult, RecordKey, RecordQueryResult};
use super::store::{load_failed, not_found, save_failed, RecordStore, StoreError};
use crate::state::Record;

/// Record store kept in process memory.
///
/// Records are held in serialized form, so a stored record never aliases the
/// caller's value and one store can hold several record types.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<RecordKey, serde_json::Value>>,
    simulate_failure: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every load and save fail, for exercising error paths
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.records.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove a record. Returns whether it existed.
    pub fn delete(&self, key: &RecordKey) -> bool {
        self.records.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            Err(StoreError::Simulated)
        } else {
            Ok(())
        }
    }

    fn write<R: Serialize>(&self, key: &RecordKey, record: &R) -> Result<(), StoreError> {
        self.check_failure()?;
        let value = serde_json::to_value(record)?;
        self.records.lock().insert(key.clone(), value);
        Ok(())
    }

    fn read<R: DeserializeOwned>(&self, key: &RecordKey) -> Result<Option<R>, StoreError> {
        self.check_failure()?;
        let value = self.records.lock().get(key).cloned();
        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<R> RecordStore<R> for MemoryRecordStore
where
    R: Record + Serialize + DeserializeOwned,
{
    async fn save(&self, key: &RecordKey, record: Option<&R>) -> CommandResult {
        let Some(record) = record else {
            return CommandResult::success();
        };

        match self.write(key, record) {
            Ok(()) => {
                tracing::debug!(key = %key, "Saved record in memory");
                CommandResult::success()
            }
            Err(e) => save_failed(key, &e),
        }
    }

    async fn load(&self, key: &RecordKey) -> RecordQueryResult<R> {
        match self.read(key) {
            Ok(Some(record)) => RecordQueryResult::success(record),
            Ok(None) => not_found(key),
            Err(e) => load_failed(key, &e),
        }
    }
}
