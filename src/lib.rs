//! # State Recorder
//!
//! Instruments data-structure operations so that every visible change
//! produces an ordered, immutable state record a renderer can replay.
//!
//! ## Core Concepts
//!
//! - **States**: Immutable event records with a type, a definition and comments
//! - **State sets**: The append-only log every tracked value of a run writes into
//! - **Tracked values**: Wrappers (`Variable`, `TrackedString`) that record their own operations
//! - **Markers**: `Hashable` and `Structure` capabilities for composite containers
//!
//! ## Example
//!
//! ```ignore
//! use argorithm::{serialize, StateSet, TrackedString, Variable};
//!
//! let set = StateSet::default();
//! let mut s = TrackedString::new("s", &set, "ab", "")?;
//! s.append("c")?;
//! let b = s.char_at(1)?;
//!
//! let mut count = Variable::new("count", &set, 0, "")?;
//! count.set_value(1)?;
//!
//! set.add_comment("done")?;
//! let payload = serialize(&set)?;
//! ```

pub mod encoding;
pub mod error;
pub mod markers;
pub mod state;
pub mod structures;
pub mod types;

// Re-exports
pub use encoding::{decode_states, encode, serialize, PayloadEncoding, Serializable};
pub use error::{ClientError, EngineError, Result};
pub use markers::{Hashable, Structure};
pub use state::{State, StateSet, StateSetConfig};
pub use structures::{StringIter, TrackedString, Variable};
pub use types::{StateDef, StateType, ValueId};
