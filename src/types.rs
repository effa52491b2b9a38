//! Core types for the state engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Definition of a state event: field name to value.
pub type StateDef = serde_json::Map<String, serde_json::Value>;

/// Source of identities for tracked values. Process wide, never reused.
static NEXT_VALUE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tracked value.
///
/// Issued once at construction and stable for the value's lifetime.
/// On the wire an id is a decimal string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(pub u64);

impl ValueId {
    /// Issue a fresh identity.
    pub fn next() -> Self {
        ValueId(NEXT_VALUE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({})", self.0)
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ValueId> for serde_json::Value {
    fn from(id: ValueId) -> Self {
        serde_json::Value::String(id.to_string())
    }
}

const VARIABLE_KEYS: &[&str] = &["id", "variable_name", "value"];
const STRING_DECLARE_KEYS: &[&str] = &["id", "variable_name", "body"];
const STRING_ITER_KEYS: &[&str] = &["id", "variable_name", "body", "index"];
const STRING_APPEND_KEYS: &[&str] = &["id", "variable_name", "body", "element"];

/// Kind of a recorded state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateType {
    VariableDeclare,
    VariableHighlight,
    StringDeclare,
    StringIter,
    StringAppend,
    Comment,
    /// A state type defined by a structure outside this crate.
    Custom(String),
}

impl StateType {
    pub fn as_str(&self) -> &str {
        match self {
            StateType::VariableDeclare => "variable_declare",
            StateType::VariableHighlight => "variable_highlight",
            StateType::StringDeclare => "string_declare",
            StateType::StringIter => "string_iter",
            StateType::StringAppend => "string_append",
            StateType::Comment => "comment",
            StateType::Custom(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "variable_declare" => StateType::VariableDeclare,
            "variable_highlight" => StateType::VariableHighlight,
            "string_declare" => StateType::StringDeclare,
            "string_iter" => StateType::StringIter,
            "string_append" => StateType::StringAppend,
            "comment" => StateType::Comment,
            other => StateType::Custom(other.to_string()),
        }
    }

    /// Keys a definition of this type must carry.
    ///
    /// `None` for comments (no definition) and custom types (unchecked).
    pub fn required_keys(&self) -> Option<&'static [&'static str]> {
        match self {
            StateType::VariableDeclare | StateType::VariableHighlight => Some(VARIABLE_KEYS),
            StateType::StringDeclare => Some(STRING_DECLARE_KEYS),
            StateType::StringIter => Some(STRING_ITER_KEYS),
            StateType::StringAppend => Some(STRING_APPEND_KEYS),
            StateType::Comment | StateType::Custom(_) => None,
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(StateType::parse(&name))
    }
}
