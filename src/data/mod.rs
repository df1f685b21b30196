//! Data persistence layer
//!
//! This module provides the [`RecordStore`] interface used around
//! [`EditableState`](crate::state::EditableState) together with an in-memory
//! store and a SQLite-backed store.

mod database;
mod memory;
mod migrations;
mod models;
mod records;
mod store;

pub use database::{Database, DatabaseError};
pub use memory::MemoryRecordStore;
pub use models::{CommandResult, RecordKey, RecordQueryResult};
pub use records::SqliteRecordStore;
pub use store::{RecordStore, StoreError};
