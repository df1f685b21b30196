//! Session module tying configuration, record stores, and editable state together.
//!
//! - [`EditCore`] opens the configured record store
//! - [`EditSession`] drives the load, edit, save cycle for one record

mod edit_core;
mod edit_session;

pub use edit_core::EditCore;
pub use edit_session::EditSession;
