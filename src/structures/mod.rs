//! Tracked values.
//!
//! Every wrapper here holds a handle to a [`StateSet`](crate::StateSet)
//! and a private generator that builds the states for its own
//! operations. Each observable operation records its state before the
//! wrapper's content changes, so a failed append leaves the value as it
//! was.

mod string;
mod variable;

pub use string::{StringIter, TrackedString};
pub use variable::Variable;

use crate::types::{StateDef, ValueId};

/// The `id` and `variable_name` keys every wrapper state starts with.
fn base_def(id: ValueId, name: &str) -> StateDef {
    let mut def = StateDef::new();
    def.insert("id".into(), id.into());
    def.insert("variable_name".into(), name.into());
    def
}
