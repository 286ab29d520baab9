//! Slip: tag-driven regeneration or drain of a resource over time.
//!
//! Per battler and resource the accumulator keeps a step counter (frames since
//! the last application) and a real-valued carry. Each application adds the
//! exact amount `maximum × rate / division / 100` to the carry, rounds it away
//! from zero in the direction of the rate, and subtracts exactly what was
//! applied. The running total of applied integers therefore never drifts more
//! than one unit from the exact total, and small fractional rates still land.
//!
//! ```text
//! Idle (rate == 0) ⇄ Accumulating (step += 1) → Apply (step ≥ cycle / division)
//! ```

use strum::EnumCount;

use crate::state::{Battler, ResourceKind};

/// Accumulator state for one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlipMeter {
    /// Frames since the last application.
    pub step: u32,
    /// Fractional amount accrued but not yet applied.
    pub carry: f64,
}

/// Accumulator state for all resources of one battler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlipState {
    meters: [SlipMeter; ResourceKind::COUNT],
}

impl SlipState {
    pub fn meter(&self, kind: ResourceKind) -> &SlipMeter {
        &self.meters[kind.index()]
    }

    pub fn meter_mut(&mut self, kind: ResourceKind) -> &mut SlipMeter {
        &mut self.meters[kind.index()]
    }

    pub fn reset(&mut self) {
        self.meters = Default::default();
    }
}

/// One quantized application produced by [`advance_slip`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlipApplication {
    /// Signed integer amount to apply; may be 0.
    pub amount: i64,
    /// Exact amount accrued by this application.
    pub accrued: f64,
    /// Carry left after subtracting `amount`.
    pub carry: f64,
}

/// Advances one resource's accumulator by a frame.
///
/// - `rate`: summed tag rate (% of maximum per reference cycle)
/// - `division`: applications per cycle; `<= 0` disables slip
/// - `cycle`: reference cycle length in frames
/// - `ceiling`: largest drain allowed per application, if any
///
/// Returns `None` while idle, disabled, or between applications. Nothing is
/// mutated when the rate is exactly 0 or the division is not positive.
///
/// A drain clamped by `ceiling` leaves the undelivered part in the carry.
pub fn advance_slip(
    meter: &mut SlipMeter,
    rate: f64,
    division: i32,
    cycle: f64,
    maximum: u32,
    ceiling: Option<u32>,
) -> Option<SlipApplication> {
    if rate == 0.0 || !rate.is_finite() || division <= 0 {
        return None;
    }

    meter.step = meter.step.saturating_add(1);
    let division = f64::from(division);
    let sub_interval = cycle / division;
    if f64::from(meter.step) < sub_interval {
        return None;
    }

    meter.step = 0;
    let accrued = f64::from(maximum) * rate / division / 100.0;
    meter.carry += accrued;

    // An application never moves against the rate: an owed drain left in the
    // carry absorbs later healing instead of being applied as damage.
    let amount = if rate > 0.0 {
        (meter.carry.ceil() as i64).max(0)
    } else {
        let drain = (meter.carry.floor() as i64).min(0);
        match ceiling {
            Some(limit) => drain.max(-i64::from(limit)),
            None => drain,
        }
    };
    meter.carry -= amount as f64;

    Some(SlipApplication {
        amount,
        accrued,
        carry: meter.carry,
    })
}

/// Host policy bounding how much a single drain may take.
pub trait SlipCeiling: Send + Sync {
    /// Largest drain magnitude allowed per application, `None` for unbounded.
    fn max_slip_damage(&self, battler: &Battler, kind: ResourceKind) -> Option<u32>;
}

/// HP drain may take everything (slip death) or leave 1 HP; MP/TP unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardSlipCeiling {
    pub slip_death: bool,
}

impl StandardSlipCeiling {
    pub const fn new(slip_death: bool) -> Self {
        Self { slip_death }
    }
}

impl SlipCeiling for StandardSlipCeiling {
    fn max_slip_damage(&self, battler: &Battler, kind: ResourceKind) -> Option<u32> {
        match kind {
            ResourceKind::Hp => {
                let hp = battler.resources.current(ResourceKind::Hp);
                Some(if self.slip_death {
                    hp
                } else {
                    hp.saturating_sub(1)
                })
            }
            ResourceKind::Mp | ResourceKind::Tp => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BattlerId, ResourceMeters, Side};

    /// Runs `frames` frames and returns the summed applied amount and the
    /// number of applications.
    fn simulate(
        meter: &mut SlipMeter,
        rate: f64,
        division: i32,
        cycle: f64,
        maximum: u32,
        frames: u32,
    ) -> (i64, u32) {
        let mut total = 0;
        let mut applications = 0;
        for _ in 0..frames {
            if let Some(app) = advance_slip(meter, rate, division, cycle, maximum, None) {
                total += app.amount;
                applications += 1;
            }
        }
        (total, applications)
    }

    #[test]
    fn zero_rate_stays_idle() {
        let mut meter = SlipMeter::default();
        for _ in 0..1000 {
            assert!(advance_slip(&mut meter, 0.0, 6, 240.0, 1000, None).is_none());
        }
        assert_eq!(meter, SlipMeter::default());
    }

    #[test]
    fn non_positive_division_disables() {
        for division in [0, -3] {
            let mut meter = SlipMeter::default();
            for _ in 0..500 {
                assert!(advance_slip(&mut meter, 5.0, division, 240.0, 1000, None).is_none());
            }
            assert_eq!(meter, SlipMeter::default());
        }
    }

    #[test]
    fn applies_on_sub_interval_boundary() {
        // 240 / 6 = 40 frames per application, 1000 × 5 / 6 / 100 ≈ 8.33
        let mut meter = SlipMeter::default();
        for _ in 0..39 {
            assert!(advance_slip(&mut meter, 5.0, 6, 240.0, 1000, None).is_none());
        }
        assert_eq!(meter.step, 39);
        let app = advance_slip(&mut meter, 5.0, 6, 240.0, 1000, None).unwrap();
        assert_eq!(app.amount, 9);
        assert_eq!(meter.step, 0);
        assert!((app.carry - (1000.0 * 5.0 / 6.0 / 100.0 - 9.0)).abs() < 1e-9);
    }

    #[test]
    fn small_fraction_does_not_stall() {
        // 0.3 per application must still land.
        let mut meter = SlipMeter::default();
        let (total, applications) = simulate(&mut meter, 3.0, 10, 10.0, 100, 1000);
        assert_eq!(applications, 1000);
        let exact = 0.3 * f64::from(applications);
        assert!((total as f64 - exact).abs() < 1.0, "total {total} exact {exact}");
        assert!(total > 0);
    }

    #[test]
    fn cumulative_total_tracks_exact_amount() {
        for (rate, division, maximum) in [(5.0, 6, 1000), (-2.5, 7, 333), (1.0, 12, 57)] {
            let mut meter = SlipMeter::default();
            let (total, applications) = simulate(&mut meter, rate, division, 240.0, maximum, 24_000);
            let exact =
                f64::from(applications) * f64::from(maximum) * rate / f64::from(division) / 100.0;
            assert!(
                (total as f64 - exact).abs() < 1.0,
                "rate {rate}: total {total} exact {exact}"
            );
            assert!(meter.carry.abs() < 1.0);
        }
    }

    #[test]
    fn healing_never_applies_negative() {
        let mut meter = SlipMeter::default();
        for _ in 0..2400 {
            if let Some(app) = advance_slip(&mut meter, 0.7, 6, 240.0, 200, None) {
                assert!(app.amount >= 0);
            }
        }
    }

    #[test]
    fn draining_never_applies_positive() {
        let mut meter = SlipMeter::default();
        for _ in 0..2400 {
            if let Some(app) = advance_slip(&mut meter, -0.7, 6, 240.0, 200, None) {
                assert!(app.amount <= 0);
            }
        }
    }

    #[test]
    fn clamped_drain_keeps_remainder_in_carry() {
        // -10% of 1000 over 1 division = -100 per application, ceiling 30.
        let mut meter = SlipMeter::default();
        let app = advance_slip(&mut meter, -10.0, 1, 1.0, 1000, Some(30)).unwrap();
        assert_eq!(app.amount, -30);
        assert!((app.carry - -70.0).abs() < 1e-9);
        assert!((meter.carry - -70.0).abs() < 1e-9);
    }

    #[test]
    fn owed_drain_absorbs_healing() {
        let mut meter = SlipMeter::default();
        advance_slip(&mut meter, -10.0, 1, 1.0, 1000, Some(30)).unwrap();
        // carry is -70; +50 per application only pays the debt down at first.
        let first = advance_slip(&mut meter, 5.0, 1, 1.0, 1000, None).unwrap();
        assert_eq!(first.amount, 0);
        assert!((first.carry - -20.0).abs() < 1e-9);
        let second = advance_slip(&mut meter, 5.0, 1, 1.0, 1000, None).unwrap();
        assert_eq!(second.amount, 30);
        assert!(second.carry.abs() < 1e-9);
    }

    #[test]
    fn stacked_rates_match_single_rate() {
        let mut stacked = SlipMeter::default();
        let mut single = SlipMeter::default();
        for _ in 0..1200 {
            let a = advance_slip(&mut stacked, 5.0 + 7.0, 6, 240.0, 900, None);
            let b = advance_slip(&mut single, 12.0, 6, 240.0, 900, None);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn standard_ceiling_respects_slip_death() {
        let battler = Battler::new(
            BattlerId(1),
            Side::Troop,
            "slime",
            10,
            ResourceMeters::at_max(40, 10),
        );
        assert_eq!(
            StandardSlipCeiling::new(false).max_slip_damage(&battler, ResourceKind::Hp),
            Some(39)
        );
        assert_eq!(
            StandardSlipCeiling::new(true).max_slip_damage(&battler, ResourceKind::Hp),
            Some(40)
        );
        assert_eq!(
            StandardSlipCeiling::new(true).max_slip_damage(&battler, ResourceKind::Mp),
            None
        );
    }
}
