//! Editable record state
//!
//! [`EditableState`] holds a baseline record and a working copy, reports
//! whether the working copy differs from the baseline, and notifies observers
//! when a field changes or when the dirty/clean state flips.

mod editable;
mod events;
mod record;

pub use editable::EditableState;
pub use events::{StateEvent, SubscriptionId};
pub use record::{Field, Record};
