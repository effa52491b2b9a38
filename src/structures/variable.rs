//! Tracked scalar values.

use super::base_def;
use crate::error::Result;
use crate::markers::{Hashable, Structure};
use crate::state::{State, StateSet};
use crate::types::{StateType, ValueId};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Builds the states of one [`Variable`].
#[derive(Clone, Debug)]
struct VariableState {
    id: ValueId,
    name: String,
}

impl VariableState {
    fn declare(&self, value: Value, comments: String) -> State {
        let mut def = base_def(self.id, &self.name);
        def.insert("value".into(), value);
        State::new(StateType::VariableDeclare, Some(def), comments)
    }

    /// `last_value` is left out when there was no previous value.
    fn highlight(&self, value: Value, last_value: Value, comments: String) -> State {
        let mut def = base_def(self.id, &self.name);
        def.insert("value".into(), value);
        if !last_value.is_null() {
            def.insert("last_value".into(), last_value);
        }
        State::new(StateType::VariableHighlight, Some(def), comments)
    }
}

/// A scalar whose every write is recorded.
///
/// Construction records `variable_declare`. Every later write through
/// [`Variable::set_value`] records `variable_highlight`, including writes
/// of an equal value. The constructor's own assignment never produces a
/// highlight.
///
/// ```ignore
/// let set = StateSet::default();
/// let mut count = Variable::new("count", &set, 0, "")?;
/// count.set_value(1)?;
/// count.update(|c| c + 1)?;
/// assert_eq!(set.len(), 3);
/// ```
pub struct Variable<T> {
    generator: VariableState,
    set: StateSet,
    value: T,
}

impl<T: Serialize> Variable<T> {
    pub fn new(
        name: impl Into<String>,
        set: &StateSet,
        value: T,
        comments: impl Into<String>,
    ) -> Result<Self> {
        let generator = VariableState {
            id: ValueId::next(),
            name: name.into(),
        };

        let declared = serde_json::to_value(&value)?;
        set.add_state(generator.declare(declared, comments.into()))?;

        Ok(Self {
            generator,
            set: set.clone(),
            value,
        })
    }

    /// Overwrite the value and record the write.
    pub fn set_value(&mut self, value: T) -> Result<()> {
        self.set_value_with_comments(value, "")
    }

    pub fn set_value_with_comments(&mut self, value: T, comments: impl Into<String>) -> Result<()> {
        let last_value = serde_json::to_value(&self.value)?;
        let next_value = serde_json::to_value(&value)?;
        self.set.add_state(
            self.generator
                .highlight(next_value, last_value, comments.into()),
        )?;
        self.value = value;
        Ok(())
    }

    /// Compute a new value from the current one and write it.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let next = f(&self.value);
        self.set_value(next)
    }
}

impl<T> Variable<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.generator.name
    }

    pub fn id(&self) -> ValueId {
        self.generator.id
    }

    /// The log this variable records into.
    pub fn state_set(&self) -> &StateSet {
        &self.set
    }
}

impl<T> Hashable for Variable<T> {}
impl<T> Structure for Variable<T> {}

impl<T: fmt::Debug> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({:?})", self.value)
    }
}
