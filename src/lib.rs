pub mod config;
pub mod counter;
pub mod data;
pub mod session;
pub mod state;
pub mod util;

pub use config::{Config, StoreBackend};
pub use counter::Counter;
pub use data::{
    CommandResult, Database, MemoryRecordStore, RecordKey, RecordQueryResult, RecordStore,
    SqliteRecordStore, StoreError,
};
pub use session::{EditCore, EditSession};
pub use state::{EditableState, Field, Record, StateEvent, SubscriptionId};
