//! Read-only collaborators the tick engine consults.
//!
//! [`BattleEnv`] bundles the configuration, the active speed model, the host's
//! slip-damage ceiling and (optionally) the game variable store so hooks can
//! reach everything without hard coupling to concrete implementations.

use core::fmt;

use crate::config::BattleConfig;
use crate::slip::SlipCeiling;
use crate::speed::SpeedModel;
use crate::timing::TimingMode;

/// Index of a game variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableId(pub u32);

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Mutable host-side number store, read once per query.
///
/// Implementations return 0 for unset or non-numeric entries.
pub trait VariableOracle: Send + Sync {
    fn value(&self, id: VariableId) -> f64;
}

/// Aggregates the collaborators required by the tick hooks.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    config: &'a BattleConfig,
    speed: &'a dyn SpeedModel,
    ceiling: &'a dyn SlipCeiling,
    variables: Option<&'a dyn VariableOracle>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        config: &'a BattleConfig,
        speed: &'a dyn SpeedModel,
        ceiling: &'a dyn SlipCeiling,
    ) -> Self {
        Self {
            config,
            speed,
            ceiling,
            variables: None,
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: &'a dyn VariableOracle) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    pub fn speed(&self) -> &'a dyn SpeedModel {
        self.speed
    }

    pub fn ceiling(&self) -> &'a dyn SlipCeiling {
        self.ceiling
    }

    pub fn variables(&self) -> Option<&'a dyn VariableOracle> {
        self.variables
    }

    /// Frames in the reference cycle for `mode`, honoring variable overrides.
    pub fn cycle_length(&self, mode: TimingMode) -> f64 {
        self.config.timing.cycle_length(mode, self.variables)
    }
}

impl fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .field("speed", &self.speed.name())
            .field("has_variables", &self.variables.is_some())
            .finish()
    }
}
