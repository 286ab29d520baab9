//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the tick engine and host operations so clients can
//! bubble them up with consistent context.
use thiserror::Error;

use tpb_core::{BattleError, BattlerId, EngineError, ErrorSeverity, TickError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Tick(#[from] TickError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("critical hook '{hook}' failed for battler {battler}")]
    CriticalHook {
        battler: BattlerId,
        hook: &'static str,
        #[source]
        error: TickError,
    },

    #[error("runtime requires a roster to be configured before building")]
    MissingRoster,
}

impl RuntimeError {
    /// Severity of the underlying failure.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Tick(err) | RuntimeError::CriticalHook { error: err, .. } => {
                err.severity()
            }
            RuntimeError::Engine(err) => err.severity(),
            RuntimeError::MissingRoster => ErrorSeverity::Validation,
        }
    }
}
