//! Immutable state records.

use crate::error::{EngineError, Result};
use crate::types::{StateDef, StateType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded event, replayed in order by a renderer.
///
/// Fields are fixed at construction; there is no way to mutate a state
/// once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    state_type: StateType,
    state_def: Option<StateDef>,
    comments: String,
    #[serde(default)]
    autoplay: bool,
}

impl State {
    /// Create a new state with `autoplay` off.
    ///
    /// A custom type spelled like a built-in one is recorded as the
    /// built-in type, so it is checked against that type's shape.
    pub fn new(
        state_type: StateType,
        state_def: Option<StateDef>,
        comments: impl Into<String>,
    ) -> Self {
        let state_type = match state_type {
            StateType::Custom(name) => StateType::parse(&name),
            known => known,
        };
        Self {
            state_type,
            state_def,
            comments: comments.into(),
            autoplay: false,
        }
    }

    /// Same as [`State::new`] with an explicit autoplay flag.
    pub fn with_autoplay(
        state_type: StateType,
        state_def: Option<StateDef>,
        comments: impl Into<String>,
        autoplay: bool,
    ) -> Self {
        Self {
            autoplay,
            ..Self::new(state_type, state_def, comments)
        }
    }

    /// A free-form narration state with no definition.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(StateType::Comment, None, text)
    }

    /// Build a state from a loosely typed JSON object.
    ///
    /// `state_type`, `state_def` and `comments` must all be present
    /// (`state_def` may be null); `autoplay` is optional.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            EngineError::InvalidArgument("state arguments must be a JSON object".into())
        })?;

        let state_type = obj
            .get("state_type")
            .ok_or(EngineError::MissingField("state_type"))?
            .as_str()
            .ok_or_else(|| EngineError::InvalidArgument("state_type must be a string".into()))?;

        let state_def = match obj.get("state_def").ok_or(EngineError::MissingField("state_def"))? {
            serde_json::Value::Null => None,
            serde_json::Value::Object(map) => Some(map.clone()),
            _ => {
                return Err(EngineError::InvalidArgument(
                    "state_def must be an object or null".into(),
                ))
            }
        };

        let comments = obj
            .get("comments")
            .ok_or(EngineError::MissingField("comments"))?
            .as_str()
            .ok_or_else(|| EngineError::InvalidArgument("comments must be a string".into()))?;

        let autoplay = match obj.get("autoplay") {
            None => false,
            Some(v) => v.as_bool().ok_or_else(|| {
                EngineError::InvalidArgument("autoplay must be a boolean".into())
            })?,
        };

        Ok(Self::with_autoplay(
            StateType::parse(state_type),
            state_def,
            comments,
            autoplay,
        ))
    }

    pub fn state_type(&self) -> &StateType {
        &self.state_type
    }

    pub fn state_def(&self) -> Option<&StateDef> {
        self.state_def.as_ref()
    }

    /// Look up one field of the definition.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.state_def.as_ref().and_then(|def| def.get(key))
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Check the definition against the shape its type requires.
    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: String| EngineError::MalformedState {
            state_type: self.state_type.to_string(),
            reason,
        };

        match (&self.state_type, &self.state_def) {
            (StateType::Comment, Some(_)) => {
                Err(malformed("comment states carry no definition".into()))
            }
            (StateType::Comment, None) => Ok(()),
            (StateType::Custom(name), _) if name.is_empty() => {
                Err(malformed("state type name is empty".into()))
            }
            (StateType::Custom(_), _) => Ok(()),
            (_, None) => Err(malformed("missing state definition".into())),
            (state_type, Some(def)) => {
                let required = state_type.required_keys().unwrap_or(&[]);
                match required.iter().find(|key| !def.contains_key(**key)) {
                    Some(key) => Err(malformed(format!("missing key `{key}`"))),
                    None => Ok(()),
                }
            }
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
