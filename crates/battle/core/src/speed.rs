//! Speed model: gauge fill rate and cast time.
//!
//! Formulas (spread-normalized model):
//! - fill_rate = √(agility + max_agility − min_agility)
//! - base_fill_rate = √(max_agility)
//! - cast_time = √delay / fill_rate, or 100 / delay in proportional mode
//!
//! Normalizing by the roster's current agility spread keeps the ratio of
//! action counts between the fastest and the slowest battler within [1, 2),
//! however wide the gap (buffs included). The spread is recomputed on every
//! query because agility can change every tick.

use core::fmt;

use crate::config::CastTimeMode;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{Battler, Roster};

/// Errors raised by speed queries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedError {
    /// A host invariant does not hold (e.g. the roster is empty).
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

impl BattleError for SpeedError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpeedError::InvalidState(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpeedError::InvalidState(_) => "SPEED_INVALID_STATE",
        }
    }
}

/// Minimum and maximum effective agility across the whole roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgilitySpread {
    pub min: u32,
    pub max: u32,
}

impl AgilitySpread {
    /// Spread over a set of agility values; `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Option<Self> {
        values.into_iter().fold(None, |spread, agility| {
            Some(match spread {
                None => Self {
                    min: agility,
                    max: agility,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(agility),
                    max: max.max(agility),
                },
            })
        })
    }

    pub const fn width(&self) -> u32 {
        self.max - self.min
    }

    pub const fn contains(&self, agility: u32) -> bool {
        self.min <= agility && agility <= self.max
    }
}

impl Roster {
    /// Scans both sides for the current agility spread.
    pub fn agility_spread(&self) -> Result<AgilitySpread, SpeedError> {
        AgilitySpread::from_values(self.iter().map(Battler::agility))
            .ok_or(SpeedError::InvalidState("agility spread of an empty roster"))
    }
}

/// Strategy that turns agility into gauge fill rates.
pub trait SpeedModel: Send + Sync {
    /// Returns a human-readable name for this model (used in logging).
    fn name(&self) -> &'static str;

    /// Per-tick fill rate of a battler with `agility`.
    fn fill_rate(&self, agility: u32, spread: AgilitySpread) -> f64;

    /// Reference rate used to normalize fill rates; independent of any one battler.
    fn base_fill_rate(&self, spread: AgilitySpread) -> f64;

    /// `fill_rate / base_fill_rate`, or 1 when the base rate is not positive.
    fn relative_speed(&self, agility: u32, spread: AgilitySpread) -> f64 {
        let base = self.base_fill_rate(spread);
        if base > 0.0 {
            self.fill_rate(agility, spread) / base
        } else {
            1.0
        }
    }
}

impl fmt::Debug for dyn SpeedModel + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// √(agility + spread width), base √(max).
#[derive(Clone, Copy, Debug, Default)]
pub struct SpreadNormalizedSpeed;

impl SpeedModel for SpreadNormalizedSpeed {
    fn name(&self) -> &'static str {
        "spread_normalized"
    }

    fn fill_rate(&self, agility: u32, spread: AgilitySpread) -> f64 {
        (f64::from(agility) + f64::from(spread.max) - f64::from(spread.min)).sqrt()
    }

    fn base_fill_rate(&self, spread: AgilitySpread) -> f64 {
        f64::from(spread.max).sqrt()
    }
}

/// Host default: √agility + 1, base √max + 1.
///
/// Kept for comparison; with extreme agility gaps the slowest battler can be
/// lapped many times over.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicSpeed;

impl SpeedModel for ClassicSpeed {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn fill_rate(&self, agility: u32, _spread: AgilitySpread) -> f64 {
        f64::from(agility).sqrt() + 1.0
    }

    fn base_fill_rate(&self, spread: AgilitySpread) -> f64 {
        f64::from(spread.max).sqrt() + 1.0
    }
}

/// Selectable built-in speed models.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpeedModelKind {
    #[default]
    SpreadNormalized,
    Classic,
}

impl SpeedModelKind {
    pub fn model(self) -> &'static dyn SpeedModel {
        match self {
            SpeedModelKind::SpreadNormalized => &SpreadNormalizedSpeed,
            SpeedModelKind::Classic => &ClassicSpeed,
        }
    }
}

/// Total charge delay of a battler's valid queued actions.
pub fn cast_delay(battler: &Battler) -> u64 {
    battler
        .valid_actions()
        .map(|action| u64::from(action.item.charge_delay()))
        .sum()
}

/// Cast time for a given delay; 0 whenever the delay is 0.
pub fn cast_time_for(delay: u64, fill_rate: f64, mode: CastTimeMode) -> f64 {
    if delay == 0 {
        return 0.0;
    }
    let delay = delay as f64;
    match mode {
        CastTimeMode::SquareRoot => delay.sqrt() / fill_rate,
        CastTimeMode::Proportional => 100.0 / delay,
    }
}

/// Required cast time under an arbitrary speed model.
pub fn required_cast_time_with(
    model: &dyn SpeedModel,
    battler: &Battler,
    spread: AgilitySpread,
    mode: CastTimeMode,
) -> f64 {
    cast_time_for(
        cast_delay(battler),
        model.fill_rate(battler.agility(), spread),
        mode,
    )
}

/// Spread-normalized fill rate of `battler` within `roster`.
pub fn fill_rate(battler: &Battler, roster: &Roster) -> Result<f64, SpeedError> {
    let spread = roster.agility_spread()?;
    Ok(SpreadNormalizedSpeed.fill_rate(battler.agility(), spread))
}

/// √(max agility of `roster`).
pub fn base_fill_rate(roster: &Roster) -> Result<f64, SpeedError> {
    let spread = roster.agility_spread()?;
    Ok(SpreadNormalizedSpeed.base_fill_rate(spread))
}

/// Delay before `battler`'s queued actions execute.
pub fn required_cast_time(
    battler: &Battler,
    roster: &Roster,
    mode: CastTimeMode,
) -> Result<f64, SpeedError> {
    let spread = roster.agility_spread()?;
    Ok(required_cast_time_with(
        &SpreadNormalizedSpeed,
        battler,
        spread,
        mode,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        BattlerId, ItemDefinition, QueuedAction, ResourceMeters, Side,
    };
    use crate::stats::Bonus;

    fn battler(id: u32, side: Side, agility: u32) -> Battler {
        Battler::new(
            BattlerId(id),
            side,
            format!("b{id}"),
            agility,
            ResourceMeters::at_max(100, 10),
        )
    }

    fn roster(agilities: &[(Side, u32)]) -> Roster {
        let mut roster = Roster::new();
        for (i, (side, agility)) in agilities.iter().enumerate() {
            roster.insert(battler(i as u32, *side, *agility)).unwrap();
        }
        roster
    }

    fn with_actions(mut b: Battler, speeds: &[i32]) -> Battler {
        for speed in speeds {
            b.queue_action(QueuedAction::new(ItemDefinition::new("skill", *speed)))
                .unwrap();
        }
        b
    }

    #[test]
    fn spread_covers_both_sides() {
        let roster = roster(&[(Side::Party, 30), (Side::Party, 80), (Side::Troop, 12)]);
        let spread = roster.agility_spread().unwrap();
        assert_eq!(spread, AgilitySpread { min: 12, max: 80 });
        for b in roster.iter() {
            assert!(spread.contains(b.agility()));
            assert!(fill_rate(b, &roster).unwrap() >= f64::from(b.agility()).sqrt());
        }
    }

    #[test]
    fn empty_roster_is_invalid_state() {
        let roster = Roster::new();
        let err = roster.agility_spread().unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "SPEED_INVALID_STATE");
        assert!(base_fill_rate(&roster).is_err());
    }

    #[test]
    fn fill_rate_follows_spread() {
        let roster = roster(&[(Side::Party, 10), (Side::Troop, 50)]);
        let slow = roster.get(BattlerId(0)).unwrap();
        let fast = roster.get(BattlerId(1)).unwrap();
        // √(10 + 40) and √(50 + 40)
        assert!((fill_rate(slow, &roster).unwrap() - 50f64.sqrt()).abs() < 1e-12);
        assert!((fill_rate(fast, &roster).unwrap() - 90f64.sqrt()).abs() < 1e-12);
        assert!((base_fill_rate(&roster).unwrap() - 50f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn buff_is_seen_on_next_query() {
        let mut roster = roster(&[(Side::Party, 20), (Side::Troop, 40)]);
        let before = base_fill_rate(&roster).unwrap();
        roster
            .get_mut(BattlerId(0))
            .unwrap()
            .agility
            .add_bonus(Bonus::flat(80));
        let after = base_fill_rate(&roster).unwrap();
        assert!((before - 40f64.sqrt()).abs() < 1e-12);
        assert!((after - 100f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn relative_speed_ratio_stays_below_two() {
        let model = SpreadNormalizedSpeed;
        for (min, max) in [(1, 1), (1, 9999), (10, 11), (50, 500)] {
            let spread = AgilitySpread { min, max };
            let ratio = model.relative_speed(max, spread) / model.relative_speed(min, spread);
            assert!((1.0..2.0).contains(&ratio), "ratio {ratio} for {min}..{max}");
        }
    }

    #[test]
    fn non_negative_speeds_never_delay() {
        let roster = roster(&[(Side::Party, 25), (Side::Troop, 60)]);
        let b = with_actions(roster.get(BattlerId(0)).unwrap().clone(), &[0, 20, 2000]);
        for mode in [CastTimeMode::SquareRoot, CastTimeMode::Proportional] {
            assert_eq!(required_cast_time(&b, &roster, mode).unwrap(), 0.0);
        }
    }

    #[test]
    fn proportional_mode_divides_hundred() {
        let roster = roster(&[(Side::Party, 25), (Side::Troop, 60)]);
        let b = with_actions(roster.get(BattlerId(0)).unwrap().clone(), &[-300]);
        let time = required_cast_time(&b, &roster, CastTimeMode::Proportional).unwrap();
        assert!((time - 100.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn square_root_mode_scales_with_fill_rate() {
        let roster = roster(&[(Side::Party, 25), (Side::Troop, 60)]);
        let b = with_actions(roster.get(BattlerId(0)).unwrap().clone(), &[-100, -44, 10]);
        // delay = 144, fill rate = √(25 + 35) = √60
        let time = required_cast_time(&b, &roster, CastTimeMode::SquareRoot).unwrap();
        assert!((time - 12.0 / 60f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn invalid_actions_do_not_delay() {
        let roster = roster(&[(Side::Party, 25), (Side::Troop, 60)]);
        let mut b = with_actions(roster.get(BattlerId(0)).unwrap().clone(), &[-300]);
        b.invalidate_actions();
        assert_eq!(cast_delay(&b), 0);
        assert_eq!(
            required_cast_time(&b, &roster, CastTimeMode::Proportional).unwrap(),
            0.0
        );
    }

    #[test]
    fn classic_model_ignores_spread() {
        let spread = AgilitySpread { min: 1, max: 81 };
        assert_eq!(ClassicSpeed.fill_rate(16, spread), 5.0);
        assert_eq!(ClassicSpeed.base_fill_rate(spread), 10.0);
        assert_eq!(SpeedModelKind::Classic.model().name(), "classic");
    }
}
