//! Shared test utilities for editstate
//!
//! - Event recording for editable states
//! - Temporary SQLite-backed stores
//! - A multi-field record with optional fields

#![allow(dead_code)]

use std::sync::Arc;

use editstate::{Database, EditableState, Field, Record, SqliteRecordStore, StateEvent};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

/// Captures every event an editable state emits, in order
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<StateEvent>>>,
}

impl EventRecorder {
    /// Register field and state callbacks on `state`
    pub fn attach<R: Record>(state: &mut EditableState<R>) -> Self {
        let recorder = Self::default();

        let events = recorder.events.clone();
        state.on_field_changed(move |name| events.lock().push(StateEvent::FieldChanged(name)));
        let events = recorder.events.clone();
        state.on_state_changed(move |dirty| events.lock().push(StateEvent::StateChanged(dirty)));

        recorder
    }

    pub fn events(&self) -> Vec<StateEvent> {
        self.events.lock().clone()
    }

    pub fn field_changes(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, StateEvent::FieldChanged(_)))
            .count()
    }

    pub fn state_changes(&self) -> Vec<bool> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                StateEvent::StateChanged(dirty) => Some(*dirty),
                StateEvent::FieldChanged(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// Create a SQLite record store in a temporary directory
pub fn create_test_store() -> (SqliteRecordStore, Database, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open(dir.path().join("test.db")).expect("Failed to open database");
    let store = SqliteRecordStore::new(db.connection());
    (store, db, dir)
}

/// Record with several fields, one of them optional
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub visits: u32,
}

impl Contact {
    pub const NAME: Field<Contact, String> = Field::new("name", |c| &c.name, |c| &mut c.name);
    pub const EMAIL: Field<Contact, Option<String>> =
        Field::new("email", |c| &c.email, |c| &mut c.email);
    pub const VISITS: Field<Contact, u32> =
        Field::new("visits", |c| &c.visits, |c| &mut c.visits);

    pub fn new(name: &str, email: Option<&str>, visits: u32) -> Self {
        Self {
            name: name.to_string(),
            email: email.map(str::to_string),
            visits,
        }
    }
}
