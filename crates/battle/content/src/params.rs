//! Host plugin parameters.
//!
//! Parameters arrive as untyped strings. Booleans accept only the literal
//! `"true"`; numbers that do not parse fall back to their default. Nothing here
//! fails: a malformed parameter file still yields a usable configuration.

use std::collections::BTreeMap;

use tpb_core::{
    BattleConfig, CastTimeMode, ModeTiming, ResourceKind, SlipConfig, SoundCue, TimingConfig,
    VariableId,
};

/// Parameter keys understood by [`PluginParameters::to_config`].
pub mod keys {
    pub const PROPORTIONATION: &str = "Proportionation";
    pub const ACTIVE_MODE: &str = "ActiveMode";
    pub const ACTIVE_MODE_VARIABLE: &str = "BattleSpeed_ActiveMode";
    pub const WAIT_MODE: &str = "WaitMode";
    pub const WAIT_MODE_VARIABLE: &str = "BattleSpeed_WaitMode";
    pub const DIVISION_HP: &str = "OneCourseDivHP";
    pub const DIVISION_MP: &str = "OneCourseDivMP";
    pub const DIVISION_TP: &str = "OneCourseDivTP";
    pub const SLIP_DEATH: &str = "SlipDeath";
    pub const CHARGE_SE: &str = "chargeMAX_SE";
    pub const VOLUME: &str = "volume";
    pub const PITCH: &str = "pitch";
    pub const PAN: &str = "pan";
}

/// Raw string parameters as configured by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PluginParameters {
    values: BTreeMap<String, String>,
}

impl PluginParameters {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` only for the literal `"true"`; `default` when the key is absent.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, |raw| raw.trim() == "true")
    }

    /// Integer parameter; `default` when absent or not a finite number.
    ///
    /// Fractional values are truncated toward zero.
    pub fn integer(&self, key: &str, default: i32) -> i32 {
        self.get(key)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .map_or(default, |value| value as i32)
    }

    fn variable(&self, key: &str) -> VariableId {
        VariableId(self.integer(key, 1).max(0) as u32)
    }

    fn mode_timing(
        &self,
        enabled_key: &str,
        variable_key: &str,
        frames: u32,
        enabled: bool,
    ) -> ModeTiming {
        let timing = ModeTiming::new(frames);
        if self.flag(enabled_key, enabled) {
            timing.with_override(self.variable(variable_key))
        } else {
            timing
        }
    }

    /// Cue named by `chargeMAX_SE`; `None` when unset or empty.
    pub fn charge_cue(&self) -> Option<SoundCue> {
        let name = self.get(keys::CHARGE_SE)?.trim();
        if name.is_empty() {
            return None;
        }
        Some(SoundCue::new(
            name,
            self.integer(keys::VOLUME, SoundCue::DEFAULT_VOLUME),
            self.integer(keys::PITCH, SoundCue::DEFAULT_PITCH),
            self.integer(keys::PAN, SoundCue::DEFAULT_PAN),
        ))
    }

    /// Builds the battle configuration these parameters describe.
    pub fn to_config(&self) -> BattleConfig {
        let cast_time = if self.flag(keys::PROPORTIONATION, false) {
            CastTimeMode::Proportional
        } else {
            CastTimeMode::SquareRoot
        };

        let timing = TimingConfig {
            active: self.mode_timing(
                keys::ACTIVE_MODE,
                keys::ACTIVE_MODE_VARIABLE,
                TimingConfig::DEFAULT_ACTIVE_FRAMES,
                true,
            ),
            wait: self.mode_timing(
                keys::WAIT_MODE,
                keys::WAIT_MODE_VARIABLE,
                TimingConfig::DEFAULT_WAIT_FRAMES,
                false,
            ),
        };

        let mut slip = SlipConfig::new().with_slip_death(self.flag(keys::SLIP_DEATH, false));
        for (kind, key) in [
            (ResourceKind::Hp, keys::DIVISION_HP),
            (ResourceKind::Mp, keys::DIVISION_MP),
            (ResourceKind::Tp, keys::DIVISION_TP),
        ] {
            slip = slip.with_division(kind, self.integer(key, SlipConfig::DEFAULT_DIVISION));
        }

        BattleConfig {
            cast_time,
            timing,
            slip,
            charge_cue: self.charge_cue(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PluginParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
