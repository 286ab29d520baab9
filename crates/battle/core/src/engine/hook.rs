//! Per-frame hooks that advance a battler's timers.
//!
//! Every frame the engine runs the hook list, in priority order, once per
//! battler. Each hook reads from and writes to a [`TickContext`] that borrows the
//! battler mutably together with the read-only environment.

use std::sync::Arc;

use crate::env::BattleEnv;
use crate::slip::advance_slip;
use crate::speed::{AgilitySpread, required_cast_time_with};
use crate::state::{Battler, Frame, ResourceKind, TpbPhase};
use crate::timing::TimingMode;

use super::{BattleEvent, TickError};

/// How the runtime should treat a failure of a hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HookCriticality {
    /// Failure stops the battle.
    Critical,
    /// Failure is logged as an error; the battle continues.
    #[default]
    Important,
    /// Failure is logged at debug level.
    Optional,
}

/// Mutable view of one battler for the duration of one frame.
pub struct TickContext<'a, 'env> {
    pub battler: &'a mut Battler,
    env: &'a BattleEnv<'env>,
    spread: AgilitySpread,
    mode: TimingMode,
    frame: Frame,
    events: &'a mut Vec<BattleEvent>,
}

impl<'a, 'env> TickContext<'a, 'env> {
    pub fn new(
        battler: &'a mut Battler,
        env: &'a BattleEnv<'env>,
        spread: AgilitySpread,
        mode: TimingMode,
        frame: Frame,
        events: &'a mut Vec<BattleEvent>,
    ) -> Self {
        Self {
            battler,
            env,
            spread,
            mode,
            frame,
            events,
        }
    }

    pub fn env(&self) -> &'a BattleEnv<'env> {
        self.env
    }

    pub fn spread(&self) -> AgilitySpread {
        self.spread
    }

    pub fn mode(&self) -> TimingMode {
        self.mode
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Frames in the reference cycle for the current mode.
    pub fn cycle_length(&self) -> f64 {
        self.env.cycle_length(self.mode)
    }

    /// Gauge progress per frame: relative speed over the cycle length.
    pub fn acceleration(&self) -> f64 {
        self.env
            .speed()
            .relative_speed(self.battler.agility(), self.spread)
            / self.cycle_length()
    }

    pub fn required_cast_time(&self) -> f64 {
        required_cast_time_with(
            self.env.speed(),
            self.battler,
            self.spread,
            self.env.config().cast_time,
        )
    }

    pub fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}

/// A rule applied to every battler on every frame.
///
/// Hooks run in priority order (lower values first).
pub trait TickHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Cheap filter evaluated before [`TickHook::apply`].
    fn should_run(&self, battler: &Battler) -> bool;

    fn apply(&self, ctx: &mut TickContext<'_, '_>) -> Result<(), TickError>;
}

fn ensure_finite(battler: &Battler, timer: &'static str, value: f64) -> Result<(), TickError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TickError::NonFiniteTimer {
            battler: battler.id,
            timer,
            value,
        })
    }
}

/// Fills the gauge of a charging battler.
#[derive(Debug)]
pub struct ChargeHook;

impl TickHook for ChargeHook {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn priority(&self) -> i32 {
        -20
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn should_run(&self, battler: &Battler) -> bool {
        battler.can_move() && battler.gauge.phase == TpbPhase::Charging
    }

    fn apply(&self, ctx: &mut TickContext<'_, '_>) -> Result<(), TickError> {
        let acceleration = ctx.acceleration();
        ctx.battler.gauge.charge += acceleration;
        ensure_finite(ctx.battler, "charge", ctx.battler.gauge.charge)?;

        if ctx.battler.gauge.charge >= 1.0 {
            ctx.battler.gauge.charge = 1.0;
            ctx.battler.gauge.phase = TpbPhase::Charged;
            let event = BattleEvent::GaugeFull {
                battler: ctx.battler.id,
                side: ctx.battler.side,
            };
            ctx.emit(event);
        }
        Ok(())
    }
}

/// Counts down the cast time of a casting battler.
#[derive(Debug)]
pub struct CastHook;

impl TickHook for CastHook {
    fn name(&self) -> &'static str {
        "cast"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn should_run(&self, battler: &Battler) -> bool {
        battler.can_move() && battler.gauge.phase == TpbPhase::Casting
    }

    fn apply(&self, ctx: &mut TickContext<'_, '_>) -> Result<(), TickError> {
        let acceleration = ctx.acceleration();
        let required = ctx.required_cast_time();
        ctx.battler.gauge.cast += acceleration;
        ensure_finite(ctx.battler, "cast", ctx.battler.gauge.cast)?;

        if ctx.battler.gauge.cast >= required {
            ctx.battler.gauge.phase = TpbPhase::Ready;
            let event = BattleEvent::CastComplete {
                battler: ctx.battler.id,
            };
            ctx.emit(event);
        }
        Ok(())
    }
}

/// Accumulates idle time while a battler waits on something other than its gauge.
#[derive(Debug)]
pub struct IdleHook;

impl TickHook for IdleHook {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn should_run(&self, battler: &Battler) -> bool {
        battler.is_alive() && (battler.restricted || battler.gauge.is_charged())
    }

    fn apply(&self, ctx: &mut TickContext<'_, '_>) -> Result<(), TickError> {
        let acceleration = ctx.acceleration();
        ctx.battler.gauge.idle += acceleration;
        ensure_finite(ctx.battler, "idle", ctx.battler.gauge.idle)
    }
}

/// Applies tagged slip to every resource.
#[derive(Debug)]
pub struct SlipHook;

impl TickHook for SlipHook {
    fn name(&self) -> &'static str {
        "slip"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn should_run(&self, battler: &Battler) -> bool {
        battler.is_alive()
    }

    fn apply(&self, ctx: &mut TickContext<'_, '_>) -> Result<(), TickError> {
        let env = ctx.env();
        let cycle = ctx.cycle_length();

        for kind in ResourceKind::ALL {
            let rate = ctx.battler.tagged_rate(kind.slip_tag());
            let division = env.config().slip.division(kind);
            let maximum = ctx.battler.resources.maximum(kind);
            let ceiling = if rate < 0.0 {
                env.ceiling().max_slip_damage(ctx.battler, kind)
            } else {
                None
            };

            let meter = ctx.battler.slip.meter_mut(kind);
            let Some(application) = advance_slip(meter, rate, division, cycle, maximum, ceiling)
            else {
                continue;
            };
            ensure_finite(ctx.battler, "slip carry", application.carry)?;
            if application.amount == 0 {
                continue;
            }

            let change = ctx.battler.resources.gain(kind, application.amount);
            let battler = ctx.battler.id;
            let side = ctx.battler.side;
            ctx.emit(BattleEvent::SlipApplied {
                battler,
                resource: kind,
                amount: application.amount,
                change,
            });
            if kind == ResourceKind::Hp && change.before > 0 && change.after == 0 {
                ctx.emit(BattleEvent::Defeated { battler, side });
            }
        }
        Ok(())
    }
}

/// Built-in hooks sorted by priority.
pub fn default_hooks() -> Arc<[Arc<dyn TickHook>]> {
    let mut hooks: Vec<Arc<dyn TickHook>> = vec![
        Arc::new(SlipHook),
        Arc::new(IdleHook),
        Arc::new(CastHook),
        Arc::new(ChargeHook),
    ];

    hooks.sort_by_key(|hook| hook.priority());

    hooks.into()
}
