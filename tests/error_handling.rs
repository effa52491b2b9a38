//! Error handling and edge case tests.

use argorithm::{
    EngineError, State, StateSet, StateSetConfig, StateType, TrackedString, Variable,
};
use serde_json::json;

// --- State Errors ---

#[test]
fn test_state_missing_fields() {
    let result = State::from_json(&json!({"state_type": "comment", "comments": ""}));
    assert!(matches!(result, Err(EngineError::MissingField("state_def"))));
}

#[test]
fn test_add_malformed_state() {
    let set = StateSet::default();
    let def = json!({"id": "1", "variable_name": "s", "body": "ab"});
    let state = State::new(StateType::StringAppend, def.as_object().cloned(), "");

    let result = set.add_state(state);
    assert!(matches!(result, Err(EngineError::MalformedState { .. })));
    assert!(set.is_empty());
}

#[test]
fn test_add_custom_state() {
    let set = StateSet::default();
    let def = json!({"id": "7", "variable_name": "arr", "index1": 0, "index2": 3});
    let state = State::new(
        StateType::parse("array_swap"),
        def.as_object().cloned(),
        "swap",
    );

    set.add_state(state).unwrap();
    assert_eq!(set.last().unwrap().state_type().as_str(), "array_swap");
}

#[test]
fn test_custom_state_cannot_bypass_builtin_shape() {
    let set = StateSet::default();
    let state = State::new(StateType::Custom("string_iter".into()), None, "");

    let result = set.add_state(state);
    assert!(matches!(result, Err(EngineError::MalformedState { .. })));
    assert!(set.is_empty());
}

// --- Configuration Errors ---

#[test]
fn test_invalid_autoplay_config() {
    let result = StateSetConfig::from_json(&json!({"autoplay": 1}));
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}

// --- Wrapper Errors ---

#[test]
fn test_any_name_is_accepted() {
    let set = StateSet::default();

    let s = TrackedString::new("", &set, "ab", "").unwrap();
    let v = Variable::new("  ", &set, 0, "").unwrap();

    assert_eq!(s.name(), "");
    assert_eq!(v.name(), "  ");
    assert_eq!(s.slice(..1).unwrap().name(), "_sub");
    assert_eq!(set.len(), 3);
}

#[test]
fn test_item_assignment_rejected() {
    let set = StateSet::default();
    let mut s = TrackedString::new("s", &set, "abc", "").unwrap();

    for i in 0..5 {
        assert!(matches!(
            s.set_char(i, 'x'),
            Err(EngineError::UnsupportedOperation(_))
        ));
    }
    assert_eq!(s.body(), "abc");
    assert_eq!(set.len(), 1);
}

#[test]
fn test_out_of_range_read_records_nothing() {
    let set = StateSet::default();
    let s = TrackedString::new("s", &set, "", "").unwrap();

    assert!(matches!(
        s.char_at(0),
        Err(EngineError::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert_eq!(s.iter().count(), 0);
    assert_eq!(set.len(), 1);
}

// --- Sealed Set Errors ---

#[test]
fn test_sealed_set_is_not_a_recording_target() {
    let set = StateSet::default();
    let mut s = TrackedString::new("s", &set, "ab", "").unwrap();
    let mut v = Variable::new("v", &set, 1, "").unwrap();
    set.seal();

    assert!(matches!(
        TrackedString::new("t", &set, "", ""),
        Err(EngineError::SealedStateSet)
    ));
    assert!(matches!(s.append("c"), Err(EngineError::SealedStateSet)));
    assert!(matches!(s.concat("c"), Err(EngineError::SealedStateSet)));
    assert!(matches!(s.slice(0..1), Err(EngineError::SealedStateSet)));
    assert!(matches!(v.set_value(2), Err(EngineError::SealedStateSet)));

    // Nothing changed and nothing was recorded
    assert_eq!(s.body(), "ab");
    assert_eq!(*v.value(), 1);
    assert_eq!(set.len(), 2);
}
