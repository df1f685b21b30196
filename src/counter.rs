//! Demo record: a single named counter

use serde::{Deserialize, Serialize};

use crate::state::{EditableState, Field};

/// Persisted counter value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub counter: i64,
}

impl Counter {
    pub const COUNTER: Field<Counter, i64> =
        Field::new("counter", |c| &c.counter, |c| &mut c.counter);

    pub fn new(counter: i64) -> Self {
        Self { counter }
    }
}

/// Add `by` to the counter held in `state`, saturating at the i64 bounds
pub fn increment(state: &mut EditableState<Counter>, by: i64) -> bool {
    state.modify(Counter::COUNTER, |value| value.saturating_add(by))
}
