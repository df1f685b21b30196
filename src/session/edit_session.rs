//! Load → edit → save flow for one keyed record

use std::sync::Arc;

use crate::data::{CommandResult, RecordKey, RecordQueryResult, RecordStore};
use crate::state::{EditableState, Record};

/// Editable state bound to a storage slot.
///
/// The session loads the record stored under its key, lets callers edit it
/// through [`state_mut`](Self::state_mut), and commits the edits as the new
/// baseline once a save succeeds. Operations that await the store take
/// `&mut self`, so the state cannot be edited while a load or save is in
/// flight.
pub struct EditSession<R: Record, S: RecordStore<R> + ?Sized> {
    key: RecordKey,
    store: Arc<S>,
    fallback: R,
    state: EditableState<R>,
}

impl<R, S> EditSession<R, S>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    /// Create a session whose state starts from `fallback`.
    ///
    /// `fallback` is also used whenever [`refresh`](Self::refresh) finds no
    /// stored record.
    pub fn new(key: impl Into<RecordKey>, store: Arc<S>, fallback: R) -> Self {
        Self {
            key: key.into(),
            store,
            state: EditableState::new(fallback.clone()),
            fallback,
        }
    }

    /// Create a session and load its record from the store
    pub async fn open(key: impl Into<RecordKey>, store: Arc<S>, fallback: R) -> Self {
        let mut session = Self::new(key, store, fallback);
        session.refresh().await;
        session
    }

    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    pub fn state(&self) -> &EditableState<R> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditableState<R> {
        &mut self.state
    }

    /// Reload the state from the store.
    ///
    /// Falls back to the session's default record when the store reports no
    /// record. The store's outcome is returned so callers can surface its
    /// message.
    pub async fn refresh(&mut self) -> RecordQueryResult<R> {
        let result = self.store.load(&self.key).await;

        let record = match &result.record {
            Some(record) if result.successful => record.clone(),
            _ => {
                tracing::debug!(key = %self.key, message = %result.message, "Using fallback record");
                self.fallback.clone()
            }
        };
        self.state.load(record);
        result
    }

    /// Persist the working copy and, on success, commit it as the baseline
    pub async fn save(&mut self) -> CommandResult {
        let record = self.state.as_record();
        let result = self.store.save(&self.key, Some(&record)).await;

        if result.successful {
            self.state.update();
        } else {
            tracing::warn!(key = %self.key, message = %result.message, "Save failed; keeping edits");
        }
        result
    }

    /// Discard unsaved edits
    pub fn revert(&mut self) {
        self.state.reset();
    }

    pub fn into_state(self) -> EditableState<R> {
        self.state
    }
}
