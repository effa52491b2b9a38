//! Integration tests for the state recorder.

use argorithm::{
    decode_states, encode, serialize, ClientError, PayloadEncoding, StateSet, StateType,
    TrackedString, Variable,
};
use serde_json::json;

fn types(set: &StateSet) -> Vec<String> {
    set.states()
        .iter()
        .map(|s| s.state_type().to_string())
        .collect()
}

// --- Realistic Workflow Tests ---

#[test]
fn test_string_walkthrough() {
    let set = StateSet::default();

    let mut s = TrackedString::new("s", &set, "ab", "").unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.last().unwrap().field("body"), Some(&json!("ab")));

    s.append("c").unwrap();
    assert_eq!(set.len(), 2);
    let appended = set.last().unwrap();
    assert_eq!(appended.state_type(), &StateType::StringAppend);
    assert_eq!(appended.field("body"), Some(&json!("abc")));
    assert_eq!(appended.field("element"), Some(&json!("c")));

    assert_eq!(s.char_at(1).unwrap(), 'b');
    assert_eq!(set.len(), 3);
    let read = set.last().unwrap();
    assert_eq!(read.state_type(), &StateType::StringIter);
    assert_eq!(read.field("index"), Some(&json!(1)));
    assert_eq!(read.field("body"), Some(&json!("abc")));

    let t = s.concat("!").unwrap();
    assert_eq!(set.len(), 5);
    let states = set.states();
    assert_eq!(states[3].state_type(), &StateType::StringDeclare);
    assert_eq!(states[3].field("body"), Some(&json!("abc")));
    assert_eq!(states[4].state_type(), &StateType::StringAppend);
    assert_eq!(states[4].field("body"), Some(&json!("abc!")));
    assert_eq!(states[4].field("element"), Some(&json!("!")));
    assert_eq!(states[4].field("id"), Some(&json!(t.id().to_string())));
    assert_eq!(s.body(), "abc");
}

#[test]
fn test_linear_search_run() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let set = StateSet::new(Some(true));
    set.add_comment("searching for 'r'").unwrap();

    let haystack = TrackedString::new("haystack", &set, "search", "").unwrap();
    let mut found = Variable::new("found", &set, None::<usize>, "").unwrap();

    for (i, ch) in haystack.iter().enumerate() {
        if ch.unwrap() == 'r' {
            found.set_value(Some(i)).unwrap();
            break;
        }
    }
    set.seal();

    assert_eq!(*found.value(), Some(3));
    assert_eq!(
        types(&set),
        vec![
            "comment",
            "string_declare",
            "variable_declare",
            "string_iter",
            "string_iter",
            "string_iter",
            "string_iter",
            "variable_highlight",
        ]
    );
    let highlight = set.last().unwrap();
    assert_eq!(highlight.field("value"), Some(&json!(3)));
    assert!(highlight.field("last_value").is_none());
}

#[test]
fn test_many_values_share_one_log() {
    let set = StateSet::default();
    let a = TrackedString::new("a", &set, "xy", "").unwrap();
    let b = TrackedString::new("b", &set, "z", "").unwrap();
    let mut n = Variable::new("n", &set, 0u32, "").unwrap();

    a.char_at(0).unwrap();
    n.set_value(1).unwrap();
    b.char_at(0).unwrap();
    a.char_at(1).unwrap();

    let ids: Vec<_> = set.states()[3..]
        .iter()
        .map(|s| s.field("id").cloned().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            json!(a.id().to_string()),
            json!(n.id().to_string()),
            json!(b.id().to_string()),
            json!(a.id().to_string()),
        ]
    );
    assert!(a.state_set().same_set(b.state_set()));
    assert!(a.state_set().same_set(n.state_set()));
}

#[test]
fn test_declare_is_first_state_per_id() {
    let set = StateSet::default();
    let s = TrackedString::new("s", &set, "hello", "").unwrap();
    let sub = s.slice(1..3).unwrap();
    let sup = sub.concat(&s).unwrap();
    for _ in sup.iter() {}

    for value_id in [s.id(), sub.id(), sup.id()] {
        let id = json!(value_id.to_string());
        let first = set
            .states()
            .into_iter()
            .find(|st| st.field("id") == Some(&id))
            .unwrap();
        assert_eq!(first.state_type(), &StateType::StringDeclare);
    }
    assert_eq!(sup.body(), "elhello");
}

#[test]
fn test_payload_replay() {
    let set = StateSet::default();
    let mut s = TrackedString::new("s", &set, "ab", "").unwrap();
    let mut v = Variable::new("v", &set, "start", "").unwrap();
    s.append("cd").unwrap();
    v.set_value_with_comments("end", "finished").unwrap();

    let payload = serialize(&set).unwrap();
    assert_eq!(payload["states"].as_array().unwrap().len(), 4);
    assert_eq!(payload["autoplay"], json!(null));
    assert_eq!(payload["states"][3]["comments"], json!("finished"));
    assert_eq!(payload["states"][3]["state_def"]["last_value"], json!("start"));

    let bytes = encode(&set, PayloadEncoding::MessagePack).unwrap();
    let replayed = decode_states(&bytes, PayloadEncoding::MessagePack).unwrap();
    assert_eq!(replayed, set.states());
}

#[test]
fn test_client_error_is_for_programs() {
    fn pick(s: &TrackedString, index: usize) -> Result<char, Box<dyn std::error::Error>> {
        if index >= s.len() {
            return Err(Box::new(ClientError::new(format!("index {index} is out of range"))));
        }
        Ok(s.char_at(index)?)
    }

    let set = StateSet::default();
    let s = TrackedString::new("s", &set, "ab", "").unwrap();

    assert_eq!(pick(&s, 0).unwrap(), 'a');
    let err = pick(&s, 5).unwrap_err();
    assert_eq!(err.to_string(), "index 5 is out of range");
    assert_eq!(set.len(), 2);
}
