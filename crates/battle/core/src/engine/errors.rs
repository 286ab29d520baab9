//! Error types for the tick engine and host operations.

use crate::error::{BattleError, ErrorSeverity};
use crate::speed::SpeedError;
use crate::state::{BattlerId, TpbPhase};

use super::HookCriticality;

/// Errors raised while advancing a frame.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TickError {
    #[error(transparent)]
    Speed(#[from] SpeedError),

    #[error("{timer} timer of battler {battler} is not finite ({value})")]
    NonFiniteTimer {
        battler: BattlerId,
        timer: &'static str,
        value: f64,
    },

    #[error("hook '{hook}' failed: {message}")]
    Hook { hook: &'static str, message: String },
}

impl BattleError for TickError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TickError::Speed(err) => err.severity(),
            TickError::NonFiniteTimer { .. } => ErrorSeverity::Internal,
            TickError::Hook { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TickError::Speed(err) => err.error_code(),
            TickError::NonFiniteTimer { .. } => "TICK_NON_FINITE_TIMER",
            TickError::Hook { .. } => "TICK_HOOK_FAILED",
        }
    }
}

/// A hook that failed for one battler; that battler was rolled back for the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HookFailure {
    pub battler: BattlerId,
    pub hook: &'static str,
    pub criticality: HookCriticality,
    pub error: TickError,
}

/// Errors surfaced by host operations on the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("battler {0} is not in the roster")]
    BattlerNotFound(BattlerId),

    #[error("battler {0} is already in the roster")]
    DuplicateBattler(BattlerId),

    #[error("battler {battler} is {actual:?}, expected {expected}")]
    UnexpectedPhase {
        battler: BattlerId,
        expected: &'static str,
        actual: TpbPhase,
    },

    #[error("action queue of battler {0} is full")]
    ActionQueueFull(BattlerId),

    #[error(transparent)]
    Speed(#[from] SpeedError),
}

impl BattleError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::BattlerNotFound(_)
            | EngineError::DuplicateBattler(_)
            | EngineError::UnexpectedPhase { .. }
            | EngineError::ActionQueueFull(_) => ErrorSeverity::Validation,
            EngineError::Speed(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::BattlerNotFound(_) => "ENGINE_BATTLER_NOT_FOUND",
            EngineError::DuplicateBattler(_) => "ENGINE_DUPLICATE_BATTLER",
            EngineError::UnexpectedPhase { .. } => "ENGINE_UNEXPECTED_PHASE",
            EngineError::ActionQueueFull(_) => "ENGINE_ACTION_QUEUE_FULL",
            EngineError::Speed(err) => err.error_code(),
        }
    }
}
