//! Runtime orchestration for time-progress battles.
//!
//! This crate wires the deterministic rules of `tpb-core` to the host: it owns
//! the battle state, the game variable store and the registered cue sinks, and
//! drives frames through [`BattleRuntime::step`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`hooks`] wraps the core tick hooks with criticality-aware logging
//! - [`oracle`] provides the host-side game variable store
//! - [`cues`] forwards presentation cues to whoever plays them
pub mod cues;
pub mod error;
pub mod hooks;
pub mod oracle;
pub mod runtime;

pub use cues::{CueSink, LogCueSink, RecordingCueSink};
pub use error::{Result, RuntimeError};
pub use hooks::HookRegistry;
pub use oracle::{GameVariables, VariableValue};
pub use runtime::{BattleRuntime, RuntimeBuilder, RuntimeConfig};
