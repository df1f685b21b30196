//! Property tests for dirty tracking and notification semantics

use proptest::prelude::*;

use super::common::{Contact, EventRecorder};
use editstate::EditableState;

#[derive(Debug, Clone)]
enum Edit {
    Name(String),
    Email(Option<String>),
    Visits(u32),
}

fn small_string() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("a".to_string()), Just("b".to_string())]
}

fn contact_strategy() -> impl Strategy<Value = Contact> {
    (small_string(), proptest::option::of(small_string()), 0u32..3).prop_map(
        |(name, email, visits)| Contact {
            name,
            email,
            visits,
        },
    )
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        small_string().prop_map(Edit::Name),
        proptest::option::of(small_string()).prop_map(Edit::Email),
        (0u32..3).prop_map(Edit::Visits),
    ]
}

/// Apply an edit to the state and to a plain model; returns whether the model changed
fn apply(state: &mut EditableState<Contact>, model: &mut Contact, edit: Edit) -> bool {
    match edit {
        Edit::Name(name) => {
            let changed = model.name != name;
            model.name = name.clone();
            assert_eq!(state.set(Contact::NAME, name), changed);
            changed
        }
        Edit::Email(email) => {
            let changed = model.email != email;
            model.email = email.clone();
            assert_eq!(state.set(Contact::EMAIL, email), changed);
            changed
        }
        Edit::Visits(visits) => {
            let changed = model.visits != visits;
            model.visits = visits;
            assert_eq!(state.set(Contact::VISITS, visits), changed);
            changed
        }
    }
}

proptest! {
    #[test]
    fn prop_new_projects_initial(initial in contact_strategy()) {
        let state = EditableState::new(initial.clone());
        prop_assert_eq!(state.as_record(), initial);
        prop_assert!(!state.is_dirty());
    }

    #[test]
    fn prop_dirty_iff_differs_from_baseline(
        initial in contact_strategy(),
        edits in proptest::collection::vec(edit_strategy(), 0..12),
    ) {
        let mut state = EditableState::new(initial.clone());
        let mut model = initial.clone();

        for edit in edits {
            apply(&mut state, &mut model, edit);
            prop_assert_eq!(state.as_record(), model.clone());
            prop_assert_eq!(state.is_dirty(), model != initial);
        }
    }

    #[test]
    fn prop_notifications_follow_edges(
        initial in contact_strategy(),
        edits in proptest::collection::vec(edit_strategy(), 0..12),
    ) {
        let mut state = EditableState::new(initial.clone());
        let recorder = EventRecorder::attach(&mut state);
        let mut model = initial.clone();

        let mut expected_fields = 0;
        let mut expected_states = Vec::new();
        let mut was_dirty = false;
        for edit in edits {
            if apply(&mut state, &mut model, edit) {
                expected_fields += 1;
                let dirty = model != initial;
                if dirty != was_dirty {
                    expected_states.push(dirty);
                    was_dirty = dirty;
                }
            }
        }

        prop_assert_eq!(recorder.field_changes(), expected_fields);
        prop_assert_eq!(recorder.state_changes(), expected_states);
    }

    #[test]
    fn prop_update_is_idempotent(
        initial in contact_strategy(),
        edits in proptest::collection::vec(edit_strategy(), 0..8),
    ) {
        let mut state = EditableState::new(initial.clone());
        let mut model = initial;
        for edit in edits {
            apply(&mut state, &mut model, edit);
        }

        state.update();
        let first = state.base().clone();
        prop_assert!(!state.is_dirty());

        state.update();
        prop_assert_eq!(state.base(), &first);
        prop_assert_eq!(first, model);
        prop_assert!(!state.is_dirty());
    }

    #[test]
    fn prop_reset_restores_baseline(
        initial in contact_strategy(),
        edits in proptest::collection::vec(edit_strategy(), 0..8),
    ) {
        let mut state = EditableState::new(initial.clone());
        let mut model = initial.clone();
        for edit in edits {
            apply(&mut state, &mut model, edit);
        }
        let recorder = EventRecorder::attach(&mut state);

        state.reset();

        prop_assert_eq!(state.as_record(), initial);
        prop_assert!(!state.is_dirty());
        prop_assert_eq!(recorder.state_changes(), vec![false]);
        prop_assert_eq!(recorder.field_changes(), 0);
    }
}
