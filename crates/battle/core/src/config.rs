//! Battle configuration resolved once at engagement start.
//!
//! [`BattleConfig`] is immutable for the lifetime of an engagement and is
//! passed by reference to every component that needs it.

use strum::EnumCount;

use crate::presentation::SoundCue;
use crate::state::ResourceKind;
use crate::timing::TimingConfig;

/// How the delay of queued actions is turned into a cast time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastTimeMode {
    /// `sqrt(delay) / fill_rate`
    #[default]
    SquareRoot,
    /// `100 / delay`: a speed of -300 casts in one third of the reference time.
    Proportional,
}

/// Slip (regeneration over time) settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlipConfig {
    /// Number of applications per reference cycle, indexed by [`ResourceKind`].
    /// A value `<= 0` disables slip for that resource.
    pub divisions: [i32; ResourceKind::COUNT],

    /// Whether draining HP slip may defeat a battler.
    pub slip_death: bool,
}

impl SlipConfig {
    pub const DEFAULT_DIVISION: i32 = 6;

    pub const fn new() -> Self {
        Self {
            divisions: [Self::DEFAULT_DIVISION; ResourceKind::COUNT],
            slip_death: false,
        }
    }

    pub const fn division(&self, kind: ResourceKind) -> i32 {
        self.divisions[kind.index()]
    }

    #[must_use]
    pub const fn with_division(mut self, kind: ResourceKind, division: i32) -> Self {
        self.divisions[kind.index()] = division;
        self
    }

    #[must_use]
    pub const fn with_slip_death(mut self, slip_death: bool) -> Self {
        self.slip_death = slip_death;
        self
    }
}

impl Default for SlipConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    pub cast_time: CastTimeMode,
    pub timing: TimingConfig,
    pub slip: SlipConfig,
    /// Cue played when a party battler's gauge becomes full.
    pub charge_cue: Option<SoundCue>,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of actions a battler can have queued at once.
    pub const MAX_ACTIONS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_proportional(&self) -> bool {
        matches!(self.cast_time, CastTimeMode::Proportional)
    }

    #[must_use]
    pub fn with_cast_time(mut self, cast_time: CastTimeMode) -> Self {
        self.cast_time = cast_time;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn with_slip(mut self, slip: SlipConfig) -> Self {
        self.slip = slip;
        self
    }

    #[must_use]
    pub fn with_charge_cue(mut self, cue: SoundCue) -> Self {
        self.charge_cue = Some(cue);
        self
    }
}
