//! Change notifications emitted by [`EditableState`](super::EditableState)

use tokio::sync::mpsc;

/// Notification emitted by an editable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// A tracked field was set to a different value
    FieldChanged(&'static str),

    /// Dirtiness was (re)evaluated; carries the current `is_dirty`
    StateChanged(bool),
}

impl StateEvent {
    /// Get a human-readable event type name for logging
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StateEvent::FieldChanged(_) => "FieldChanged",
            StateEvent::StateChanged(_) => "StateChanged",
        }
    }
}

/// Handle returned when registering an observer, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

enum Observer {
    Field(Box<dyn FnMut(&'static str) + Send>),
    State(Box<dyn FnMut(bool) + Send>),
    Stream(mpsc::UnboundedSender<StateEvent>),
}

impl Observer {
    /// Deliver an event. Returns false once the observer can no longer receive.
    fn deliver(&mut self, event: StateEvent) -> bool {
        match (self, event) {
            (Observer::Field(callback), StateEvent::FieldChanged(name)) => {
                callback(name);
                true
            }
            (Observer::State(callback), StateEvent::StateChanged(is_dirty)) => {
                callback(is_dirty);
                true
            }
            (Observer::Stream(tx), event) => tx.send(event).is_ok(),
            _ => true,
        }
    }
}

/// Ordered observer registry.
///
/// Observers are invoked synchronously, in registration order.
#[derive(Default)]
pub(crate) struct Notifier {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Notifier {
    pub(crate) fn on_field_changed(
        &mut self,
        callback: impl FnMut(&'static str) + Send + 'static,
    ) -> SubscriptionId {
        self.register(Observer::Field(Box::new(callback)))
    }

    pub(crate) fn on_state_changed(
        &mut self,
        callback: impl FnMut(bool) + Send + 'static,
    ) -> SubscriptionId {
        self.register(Observer::State(Box::new(callback)))
    }

    pub(crate) fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StateEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.register(Observer::Stream(tx));
        rx
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn emit(&mut self, event: StateEvent) {
        tracing::trace!(event = event.event_type_name(), ?event, "Emitting state event");

        self.observers.retain_mut(|(id, observer)| {
            let alive = observer.deliver(event);
            if !alive {
                tracing::debug!(subscription = id.0, "Dropping closed event stream");
            }
            alive
        });
    }

    fn register(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }
}
