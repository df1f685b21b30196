//! Working copy of a record tracked against a baseline

use std::fmt;

use tokio::sync::mpsc;

use super::events::{Notifier, StateEvent, SubscriptionId};
use super::record::{Field, Record};

/// Mediates between a persisted record and in-progress edits.
///
/// The state owns a baseline (`base`) and a working copy. Edits go through
/// [`set`](Self::set), which emits `FieldChanged` for every real change and
/// `StateChanged` only when dirtiness flips. Bulk resynchronization
/// ([`load`](Self::load), [`reset`](Self::reset), [`update`](Self::update))
/// always emits exactly one `StateChanged`.
///
/// All operations are synchronous and infallible.
///
/// # Example
/// ```
/// use editstate::counter::Counter;
/// use editstate::state::EditableState;
///
/// let mut state = EditableState::new(Counter::new(0));
/// state.set(Counter::COUNTER, 5);
/// assert!(state.is_dirty());
///
/// state.update();
/// assert!(!state.is_dirty());
/// assert_eq!(state.base(), &Counter::new(5));
/// ```
pub struct EditableState<R: Record> {
    base: R,
    working: R,
    /// Dirtiness reported by the last `StateChanged` emission
    was_dirty: bool,
    notifier: Notifier,
}

impl<R: Record> EditableState<R> {
    /// Create a state whose baseline and working copy are `initial`.
    ///
    /// Construction is not a mutation, so no events are emitted.
    pub fn new(initial: R) -> Self {
        Self {
            base: initial.clone(),
            working: initial,
            was_dirty: false,
            notifier: Notifier::default(),
        }
    }

    /// Current value of a tracked field
    pub fn get<T>(&self, field: Field<R, T>) -> &T {
        field.get(&self.working)
    }

    /// Set a tracked field.
    ///
    /// Does nothing when `value` equals the stored value. Otherwise stores it,
    /// emits `FieldChanged`, and emits `StateChanged` if dirtiness flipped.
    /// Returns whether the value changed.
    pub fn set<T: PartialEq>(&mut self, field: Field<R, T>, value: T) -> bool {
        let current = field.get_mut(&mut self.working);
        if *current == value {
            return false;
        }
        *current = value;

        tracing::trace!(field = field.name(), "Field changed");
        self.notifier.emit(StateEvent::FieldChanged(field.name()));
        self.notify_state_changed(false);
        true
    }

    /// Set a tracked field to a value computed from its current one
    pub fn modify<T: PartialEq>(&mut self, field: Field<R, T>, f: impl FnOnce(&T) -> T) -> bool {
        let value = f(self.get(field));
        self.set(field, value)
    }

    /// Project the working copy into a new record
    pub fn as_record(&self) -> R {
        self.working.clone()
    }

    /// Baseline the working copy is compared against
    pub fn base(&self) -> &R {
        &self.base
    }

    /// True iff the working copy differs from the baseline
    pub fn is_dirty(&self) -> bool {
        self.working != self.base
    }

    /// Replace both baseline and working copy with `record`.
    ///
    /// Fields are overwritten without per-field change detection, and a single
    /// `StateChanged` is always emitted.
    pub fn load(&mut self, record: R) {
        self.base = record.clone();
        self.working = record;
        self.notify_state_changed(true);
    }

    /// Discard edits, restoring the working copy from the baseline
    pub fn reset(&mut self) {
        tracing::debug!("Resetting editable state to baseline");
        self.load(self.base.clone());
    }

    /// Commit edits, making the working copy the new baseline
    pub fn update(&mut self) {
        tracing::debug!(was_dirty = self.is_dirty(), "Committing editable state");
        self.load(self.as_record());
    }

    /// Re-evaluate dirtiness and emit `StateChanged` unconditionally
    pub fn recheck(&mut self) {
        self.notify_state_changed(true);
    }

    /// Register a callback invoked with the field name after each field change
    pub fn on_field_changed(
        &mut self,
        callback: impl FnMut(&'static str) + Send + 'static,
    ) -> SubscriptionId {
        self.notifier.on_field_changed(callback)
    }

    /// Register a callback invoked with `is_dirty` on each `StateChanged`
    pub fn on_state_changed(
        &mut self,
        callback: impl FnMut(bool) + Send + 'static,
    ) -> SubscriptionId {
        self.notifier.on_state_changed(callback)
    }

    /// Stream every event emitted from now on.
    ///
    /// The stream is removed after its receiver is dropped.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StateEvent> {
        self.notifier.subscribe()
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Number of registered observers (callbacks and open streams)
    pub fn observer_count(&self) -> usize {
        self.notifier.len()
    }

    fn notify_state_changed(&mut self, force: bool) {
        let is_dirty = self.is_dirty();
        if force || is_dirty != self.was_dirty {
            self.was_dirty = is_dirty;
            self.notifier.emit(StateEvent::StateChanged(is_dirty));
        }
    }
}

impl<R: Record> fmt::Debug for EditableState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableState")
            .field("base", &self.base)
            .field("working", &self.working)
            .field("is_dirty", &self.is_dirty())
            .field("observers", &self.notifier.len())
            .finish()
    }
}
