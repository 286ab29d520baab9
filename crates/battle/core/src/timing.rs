//! Reference cycle length: frames for a gauge to fill at relative speed 1.
//!
//! Each progression mode has a default (240 frames active, 60 frames wait)
//! which the host may override at runtime through a game variable. A variable
//! value `<= 0` means "use the default", never a zero-length cycle.

use crate::env::{VariableId, VariableOracle};

/// Progression mode of the time-progress battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TimingMode {
    /// Gauges keep filling while commands are being chosen.
    #[default]
    Active,
    /// Gauges pause while commands are being chosen.
    Wait,
}

/// Cycle settings for one progression mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeTiming {
    pub default_frames: u32,
    /// Whether `variable` may override `default_frames`.
    pub override_enabled: bool,
    pub variable: VariableId,
}

impl ModeTiming {
    pub const fn new(default_frames: u32) -> Self {
        Self {
            default_frames,
            override_enabled: false,
            variable: VariableId(1),
        }
    }

    #[must_use]
    pub const fn with_override(mut self, variable: VariableId) -> Self {
        self.override_enabled = true;
        self.variable = variable;
        self
    }

    #[must_use]
    pub const fn without_override(mut self) -> Self {
        self.override_enabled = false;
        self
    }

    /// Resolves the cycle length, consulting the override store once.
    pub fn resolve(&self, variables: Option<&dyn VariableOracle>) -> f64 {
        let default = f64::from(self.default_frames);
        if !self.override_enabled {
            return default;
        }
        match variables.map(|store| store.value(self.variable)) {
            Some(value) if value.is_finite() && value > 0.0 => value,
            _ => default,
        }
    }
}

/// Cycle settings for both progression modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    pub active: ModeTiming,
    pub wait: ModeTiming,
}

impl TimingConfig {
    pub const DEFAULT_ACTIVE_FRAMES: u32 = 240;
    pub const DEFAULT_WAIT_FRAMES: u32 = 60;

    /// Active mode overridable through variable 1, wait mode fixed.
    pub const fn new() -> Self {
        Self {
            active: ModeTiming::new(Self::DEFAULT_ACTIVE_FRAMES).with_override(VariableId(1)),
            wait: ModeTiming::new(Self::DEFAULT_WAIT_FRAMES),
        }
    }

    pub const fn mode(&self, mode: TimingMode) -> &ModeTiming {
        match mode {
            TimingMode::Active => &self.active,
            TimingMode::Wait => &self.wait,
        }
    }

    /// Frames in one reference cycle for `mode`.
    pub fn cycle_length(&self, mode: TimingMode, variables: Option<&dyn VariableOracle>) -> f64 {
        self.mode(mode).resolve(variables)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Vars(HashMap<u32, f64>);

    impl VariableOracle for Vars {
        fn value(&self, id: VariableId) -> f64 {
            self.0.get(&id.0).copied().unwrap_or(0.0)
        }
    }

    fn vars(pairs: &[(u32, f64)]) -> Vars {
        Vars(pairs.iter().copied().collect())
    }

    #[test]
    fn defaults_without_store() {
        let timing = TimingConfig::default();
        assert_eq!(timing.cycle_length(TimingMode::Active, None), 240.0);
        assert_eq!(timing.cycle_length(TimingMode::Wait, None), 60.0);
    }

    #[test]
    fn non_positive_override_falls_back() {
        let timing = TimingConfig::default();
        for value in [0.0, -15.0, f64::NAN] {
            let store = vars(&[(1, value)]);
            assert_eq!(timing.cycle_length(TimingMode::Active, Some(&store)), 240.0);
        }
    }

    #[test]
    fn positive_override_wins() {
        let timing = TimingConfig::default();
        let store = vars(&[(1, 30.0)]);
        assert_eq!(timing.cycle_length(TimingMode::Active, Some(&store)), 30.0);
    }

    #[test]
    fn disabled_mode_ignores_variable() {
        let timing = TimingConfig::default();
        let store = vars(&[(1, 30.0)]);
        assert_eq!(timing.cycle_length(TimingMode::Wait, Some(&store)), 60.0);
    }

    #[test]
    fn modes_can_use_separate_variables() {
        let timing = TimingConfig {
            active: ModeTiming::new(240).with_override(VariableId(3)),
            wait: ModeTiming::new(60).with_override(VariableId(4)),
        };
        let store = vars(&[(3, 120.0), (4, 0.0)]);
        assert_eq!(timing.cycle_length(TimingMode::Active, Some(&store)), 120.0);
        assert_eq!(timing.cycle_length(TimingMode::Wait, Some(&store)), 60.0);
    }
}
