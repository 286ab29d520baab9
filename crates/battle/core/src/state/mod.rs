//! Battle state: the roster of battlers and the per-engagement clock.
//!
//! A [`BattleState`] is created at engagement start and dropped at its end.
//! Nothing here is persisted across engagements; in particular the slip
//! carries on each [`Battler`] always start from zero.
mod action;
mod battler;
mod gauge;
mod resources;
mod roster;
mod traits;

pub use action::{ItemDefinition, QueuedAction};
pub use battler::Battler;
pub use gauge::{TpbGauge, TpbPhase};
pub use resources::{ResourceChange, ResourceKind, ResourceMeter, ResourceMeters};
pub use roster::Roster;
pub use traits::{TraitSource, TraitSourceKind, parse_note_tags, parse_numeric};

use core::fmt;

use crate::timing::TimingMode;

/// Unique identifier for a battler within one engagement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlerId(pub u32);

impl fmt::Display for BattlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the engagement a battler fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// Player-controlled party.
    Party,
    /// Opposition.
    Troop,
}

impl Side {
    pub const fn is_party(&self) -> bool {
        matches!(self, Side::Party)
    }
}

/// Simulation frame counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Complete state of one engagement.
#[derive(Clone, Debug, Default)]
pub struct BattleState {
    pub roster: Roster,
    pub frame: Frame,
    pub mode: TimingMode,
}

impl BattleState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            frame: Frame::ZERO,
            mode: TimingMode::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TimingMode) -> Self {
        self.mode = mode;
        self
    }
}
