//! The recording model.
//!
//! A [`State`] is one immutable event; a [`StateSet`] is the ordered,
//! append-only log every tracked value of a run writes into.

mod record;
mod set;

pub use record::State;
pub use set::{StateSet, StateSetConfig};
