//! Tick hook registration for the runtime.
//!
//! The hooks themselves live in `tpb-core`; the runtime decides which of them
//! run and what a failure means:
//! - Critical hooks must succeed or the whole frame is discarded
//! - Important hooks log errors but allow continuation
//! - Optional hooks can fail silently (debug log only)

mod registry;

pub use registry::HookRegistry;
pub use tpb_core::{HookCriticality, TickHook};
