//! Capability markers for composite containers.
//!
//! Maps and sets built on the engine constrain their keys by
//! [`Hashable`] and their values by [`Structure`]. The two are checked
//! independently.

/// Eligible as a key in map and set structures.
pub trait Hashable {}

/// Eligible as a value in map structures.
pub trait Structure {}
