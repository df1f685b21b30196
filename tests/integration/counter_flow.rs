//! Integration tests for the counter editing flow
//!
//! Covers the load → edit → save → commit cycle against real stores.

use std::sync::Arc;

use super::common::{create_test_store, Contact, EventRecorder};
use editstate::counter::{increment, Counter};
use editstate::{
    EditSession, EditableState, MemoryRecordStore, RecordKey, RecordQueryResult, RecordStore,
    StateEvent,
};

/// Baseline {counter: 0}; set 5; update; reset
#[test]
fn test_counter_scenario_events() {
    let mut state = EditableState::new(Counter::new(0));
    let recorder = EventRecorder::attach(&mut state);

    state.set(Counter::COUNTER, 5);
    assert!(state.is_dirty());
    assert_eq!(
        recorder.events(),
        vec![
            StateEvent::FieldChanged("counter"),
            StateEvent::StateChanged(true)
        ]
    );

    recorder.clear();
    state.update();
    assert_eq!(state.base(), &Counter::new(5));
    assert!(!state.is_dirty());
    assert_eq!(recorder.events(), vec![StateEvent::StateChanged(false)]);

    recorder.clear();
    state.reset();
    assert_eq!(*state.get(Counter::COUNTER), 5);
    assert_eq!(recorder.events(), vec![StateEvent::StateChanged(false)]);
}

/// A missing key falls back to the default record
#[tokio::test]
async fn test_missing_key_falls_back_to_default() {
    let (store, _db, _dir) = create_test_store();

    let result: RecordQueryResult<Counter> = store.load(&RecordKey::from("missing-key")).await;
    assert!(!result.successful);
    assert!(result.record.is_none());

    let state = EditableState::new(result.record_or(Counter::new(0)));
    assert_eq!(state.as_record(), Counter::new(0));
    assert!(!state.is_dirty());
}

/// Saved edits are visible to a fresh session over the same database
#[tokio::test]
async fn test_session_persists_through_sqlite() {
    let (store, _db, _dir) = create_test_store();
    let store = Arc::new(store);

    let mut session = EditSession::open("Counter", store.clone(), Counter::default()).await;
    increment(session.state_mut(), 3);
    increment(session.state_mut(), 4);
    assert!(session.save().await.successful);
    assert!(!session.state().is_dirty());

    let reopened = EditSession::open("Counter", store, Counter::default()).await;
    assert_eq!(reopened.state().as_record(), Counter::new(7));
}

/// Unsaved edits are dropped by a refresh
#[tokio::test]
async fn test_refresh_discards_unsaved_edits() {
    let store = Arc::new(MemoryRecordStore::new());
    store
        .save(&RecordKey::from("Counter"), Some(&Counter::new(2)))
        .await;

    let mut session = EditSession::open("Counter", store, Counter::default()).await;
    let recorder = EventRecorder::attach(session.state_mut());
    increment(session.state_mut(), 10);

    session.refresh().await;

    assert_eq!(session.state().as_record(), Counter::new(2));
    assert_eq!(recorder.state_changes(), vec![true, false]);
}

/// Sessions on different keys do not interfere
#[tokio::test]
async fn test_keys_are_independent() {
    let store = Arc::new(MemoryRecordStore::new());

    let mut first = EditSession::open("first", store.clone(), Counter::default()).await;
    let mut second = EditSession::open("second", store.clone(), Counter::default()).await;
    first.state_mut().set(Counter::COUNTER, 1);
    second.state_mut().set(Counter::COUNTER, 2);
    assert!(first.save().await.successful);
    assert!(second.save().await.successful);

    let first = EditSession::open("first", store.clone(), Counter::default()).await;
    let second = EditSession::open("second", store, Counter::default()).await;
    assert_eq!(first.state().as_record(), Counter::new(1));
    assert_eq!(second.state().as_record(), Counter::new(2));
}

/// Multi-field records emit one FieldChanged per field and one StateChanged per flip
#[tokio::test]
async fn test_multi_field_record_round_trip() {
    let (store, _db, _dir) = create_test_store();
    let store = Arc::new(store);
    let initial = Contact::new("Ada", None, 0);

    let mut session = EditSession::open("contact", store.clone(), initial.clone()).await;
    let recorder = EventRecorder::attach(session.state_mut());

    let state = session.state_mut();
    state.set(Contact::EMAIL, Some("ada@example.com".to_string()));
    state.set(Contact::VISITS, 1);
    state.set(Contact::NAME, "Ada Lovelace".to_string());

    assert_eq!(recorder.field_changes(), 3);
    assert_eq!(recorder.state_changes(), vec![true]);

    assert!(session.save().await.successful);
    assert_eq!(recorder.state_changes(), vec![true, false]);

    let reopened = EditSession::open("contact", store, initial).await;
    assert_eq!(
        reopened.state().as_record(),
        Contact::new("Ada Lovelace", Some("ada@example.com"), 1)
    );
}

/// A stream subscriber sees the same sequence as callbacks
#[tokio::test]
async fn test_stream_subscriber_matches_callbacks() {
    let mut state = EditableState::new(Contact::default());
    let recorder = EventRecorder::attach(&mut state);
    let mut rx = state.subscribe();

    state.set(Contact::VISITS, 3);
    state.set(Contact::EMAIL, Some(String::new()));
    state.reset();
    drop(state);

    let mut streamed = Vec::new();
    while let Some(event) = rx.recv().await {
        streamed.push(event);
    }
    assert_eq!(streamed, recorder.events());
}
