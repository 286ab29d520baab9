/// Phase of a battler's time-progress gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TpbPhase {
    /// Gauge filling toward the next available action.
    #[default]
    Charging,
    /// Gauge full; waiting for an action to be chosen.
    Charged,
    /// Action chosen; waiting out its cast time.
    Casting,
    /// Cast finished; the action may execute.
    Ready,
    /// Action executing.
    Acting,
}

/// Gauge timers of one battler.
///
/// `charge` runs from 0 to 1. `cast` is compared against the required cast
/// time of the queued actions. `idle` accumulates while the battler cannot
/// act on its own (restricted, or full gauge with no action chosen).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TpbGauge {
    pub phase: TpbPhase,
    pub charge: f64,
    pub cast: f64,
    pub idle: f64,
}

impl TpbGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gauge pre-filled to `charge` (clamped to [0, 1]).
    pub fn with_charge(charge: f64) -> Self {
        Self {
            charge: if charge.is_finite() {
                charge.clamp(0.0, 1.0)
            } else {
                0.0
            },
            ..Self::default()
        }
    }

    pub fn is_charged(&self) -> bool {
        self.phase == TpbPhase::Charged
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase.into()
    }
}
