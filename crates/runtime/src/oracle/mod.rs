//! Host-side stores the core consults through its oracle traits.
//!
//! The data here is mutable between frames and read once per query; the core
//! never caches it.
mod variables;

pub use variables::{GameVariables, VariableValue};
