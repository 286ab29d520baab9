use crate::state::{BattlerId, Frame, ResourceChange, ResourceKind, Side};

use super::HookFailure;

/// Something the host should react to after a frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// The gauge filled; the battler may choose an action.
    GaugeFull { battler: BattlerId, side: Side },
    /// The queued actions finished casting and may execute.
    CastComplete { battler: BattlerId },
    /// A slip application changed a resource.
    SlipApplied {
        battler: BattlerId,
        resource: ResourceKind,
        amount: i64,
        change: ResourceChange,
    },
    /// Slip brought HP to 0.
    Defeated { battler: BattlerId, side: Side },
}

impl BattleEvent {
    pub fn battler(&self) -> BattlerId {
        match self {
            BattleEvent::GaugeFull { battler, .. }
            | BattleEvent::CastComplete { battler }
            | BattleEvent::SlipApplied { battler, .. }
            | BattleEvent::Defeated { battler, .. } => *battler,
        }
    }
}

/// Outcome of one [`super::BattleEngine::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Frame that was advanced.
    pub frame: Frame,
    pub events: Vec<BattleEvent>,
    /// Battlers skipped this frame because a hook failed.
    pub failures: Vec<HookFailure>,
    /// Battlers removed at the end of the frame (HP 0).
    pub removed: Vec<BattlerId>,
}

impl TickReport {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.events.is_empty() && self.failures.is_empty() && self.removed.is_empty()
    }
}
