//! Append-only log of states for one algorithm run.

use crate::error::{EngineError, Result};
use crate::state::record::State;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// State set configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateSetConfig {
    /// Whether the renderer should play states automatically.
    /// `None` leaves the choice to the renderer.
    pub autoplay: Option<bool>,
}

impl StateSetConfig {
    /// Load configuration from a JSON object.
    ///
    /// `autoplay` may be `true`, `false`, `null` or absent.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            EngineError::InvalidConfig("state set configuration must be a JSON object".into())
        })?;

        let autoplay = match obj.get("autoplay") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Bool(flag)) => Some(*flag),
            Some(other) => {
                return Err(EngineError::InvalidConfig(format!(
                    "autoplay should be of type bool or null, got {other}"
                )))
            }
        };

        Ok(Self { autoplay })
    }
}

struct Inner {
    states: Vec<State>,
    sealed: bool,
}

/// Ordered, append-only log of [`State`]s.
///
/// Cloning a `StateSet` yields another handle to the same log, so every
/// tracked value built from one run records into one sequence. States
/// are never removed or reordered.
#[derive(Clone)]
pub struct StateSet {
    inner: Arc<RwLock<Inner>>,
    autoplay: Option<bool>,
}

impl StateSet {
    pub fn new(autoplay: Option<bool>) -> Self {
        tracing::debug!(?autoplay, "creating state set");
        Self {
            inner: Arc::new(RwLock::new(Inner {
                states: Vec::new(),
                sealed: false,
            })),
            autoplay,
        }
    }

    pub fn from_config(config: &StateSetConfig) -> Self {
        Self::new(config.autoplay)
    }

    /// Append a state to the log.
    ///
    /// The state's definition must match the shape its type requires.
    pub fn add_state(&self, state: State) -> Result<()> {
        state.validate()?;

        let mut inner = self.inner.write();
        if inner.sealed {
            tracing::warn!(state_type = %state.state_type(), "rejected state on sealed set");
            return Err(EngineError::SealedStateSet);
        }

        tracing::trace!(
            position = inner.states.len(),
            state_type = %state.state_type(),
            "recording state"
        );
        inner.states.push(state);
        Ok(())
    }

    /// Append a narration state unconnected to any structure.
    pub fn add_comment(&self, comments: impl Into<String>) -> Result<()> {
        self.add_state(State::comment(comments))
    }

    /// Close the log; later appends fail with [`EngineError::SealedStateSet`].
    pub fn seal(&self) {
        let mut inner = self.inner.write();
        if !inner.sealed {
            tracing::debug!(states = inner.states.len(), "sealing state set");
            inner.sealed = true;
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().sealed
    }

    pub fn autoplay(&self) -> Option<bool> {
        self.autoplay
    }

    pub fn len(&self) -> usize {
        self.inner.read().states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all states in recording order.
    pub fn states(&self) -> Vec<State> {
        self.inner.read().states.clone()
    }

    pub fn get(&self, position: usize) -> Option<State> {
        self.inner.read().states.get(position).cloned()
    }

    pub fn last(&self) -> Option<State> {
        self.inner.read().states.last().cloned()
    }

    /// Whether two handles refer to the same log.
    pub fn same_set(&self, other: &StateSet) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("StateSet")
            .field("states", &inner.states.len())
            .field("autoplay", &self.autoplay)
            .field("sealed", &inner.sealed)
            .finish()
    }
}

/// One state per line, in recording order.
impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        for (i, state) in inner.states.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{state}")?;
        }
        Ok(())
    }
}
