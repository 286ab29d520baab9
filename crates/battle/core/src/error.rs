//! Common error infrastructure for tpb-core.
//!
//! Domain-specific errors (`SpeedError`, `TickError`, `EngineError`) live next
//! to the code that raises them; this module holds what they share.
//!
//! Malformed numeric *data* (note tags, variable values) never becomes an
//! error: it degrades to 0 or to the configured default. Errors are reserved
//! for violated host invariants such as an empty roster.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the battler is skipped this frame and retried next frame
/// - **Validation**: the host asked for something the current state forbids
/// - **Internal**: a timer or rate became inconsistent
/// - **Fatal**: the engagement cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tpb-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
