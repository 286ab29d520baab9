//! Frame scheduling and host operations.
//!
//! The [`BattleEngine`] is the only writer of [`BattleState`] during an
//! engagement. [`BattleEngine::tick`] advances one frame by running the hook
//! list for every battler; a battler whose hook fails is restored to its state
//! at the start of the frame while the rest of the roster proceeds.

mod errors;
mod events;
mod hook;

pub use errors::{EngineError, HookFailure, TickError};
pub use events::{BattleEvent, TickReport};
pub use hook::{
    CastHook, ChargeHook, HookCriticality, IdleHook, SlipHook, TickContext, TickHook,
    default_hooks,
};

use std::sync::Arc;

use crate::env::BattleEnv;
use crate::speed::{AgilitySpread, SpeedError, required_cast_time_with};
use crate::state::{BattleState, Battler, BattlerId, Frame, QueuedAction, TpbPhase};
use crate::timing::TimingMode;

/// Drives the gauges of every battler in a [`BattleState`].
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn frame(&self) -> Frame {
        self.state.frame
    }

    pub fn mode(&self) -> TimingMode {
        self.state.mode
    }

    pub fn set_mode(&mut self, mode: TimingMode) {
        self.state.mode = mode;
    }

    /// Advances every battler by one frame.
    ///
    /// The agility spread is recomputed before each battler so that a buff
    /// applied by an earlier hook is seen by later battlers in the same frame.
    /// Battlers at 0 HP are removed once all battlers have run.
    pub fn tick(
        &mut self,
        env: &BattleEnv<'_>,
        hooks: &[Arc<dyn TickHook>],
    ) -> Result<TickReport, TickError> {
        if self.state.roster.is_empty() {
            return Err(SpeedError::InvalidState("tick on an empty roster").into());
        }

        let frame = self.state.frame;
        let mode = self.state.mode;
        let mut report = TickReport::new(frame);

        for id in self.state.roster.ids() {
            let spread = self.state.roster.agility_spread()?;
            let Some(battler) = self.state.roster.get_mut(id) else {
                continue;
            };

            let snapshot = battler.clone();
            let mut events = Vec::new();
            match run_hooks(hooks, battler, env, spread, mode, frame, &mut events) {
                Ok(()) => report.events.append(&mut events),
                Err(failure) => {
                    *battler = snapshot;
                    report.failures.push(failure);
                }
            }
        }

        report.removed = self.state.roster.remove_defeated();
        self.state.frame = frame.next();
        Ok(report)
    }

    /// Adds a battler mid-engagement (reinforcements, summons).
    pub fn add(&mut self, battler: Battler) -> Result<(), EngineError> {
        self.state
            .roster
            .insert(battler)
            .map_err(|rejected| EngineError::DuplicateBattler(rejected.id))
    }

    /// Removes a battler (escape, host-side defeat).
    pub fn remove(&mut self, id: BattlerId) -> Result<Battler, EngineError> {
        self.state
            .roster
            .remove(id)
            .ok_or(EngineError::BattlerNotFound(id))
    }

    pub fn queue_action(&mut self, id: BattlerId, action: QueuedAction) -> Result<(), EngineError> {
        self.battler_mut(id)?
            .queue_action(action)
            .map_err(|_| EngineError::ActionQueueFull(id))
    }

    /// Marks every queued action of the battler as no longer executable.
    pub fn invalidate_actions(&mut self, id: BattlerId) -> Result<(), EngineError> {
        self.battler_mut(id)?.invalidate_actions();
        Ok(())
    }

    /// Starts waiting out the cast time of the queued actions.
    pub fn begin_casting(&mut self, id: BattlerId) -> Result<(), EngineError> {
        let battler = self.battler_mut(id)?;
        expect_phase(battler, "charged", |phase| phase == TpbPhase::Charged)?;
        battler.gauge.phase = TpbPhase::Casting;
        battler.gauge.cast = 0.0;
        Ok(())
    }

    /// Marks a ready battler as executing its actions.
    pub fn start_action(&mut self, id: BattlerId) -> Result<(), EngineError> {
        let battler = self.battler_mut(id)?;
        expect_phase(battler, "ready", |phase| phase == TpbPhase::Ready)?;
        battler.gauge.phase = TpbPhase::Acting;
        Ok(())
    }

    /// Ends the battler's turn and starts charging again.
    ///
    /// The charge hook stops at a full gauge, so the next charge starts from
    /// empty. Idle time and the action queue are reset.
    pub fn finish_action(&mut self, id: BattlerId) -> Result<(), EngineError> {
        let battler = self.battler_mut(id)?;
        expect_phase(battler, "ready or acting", |phase| {
            matches!(phase, TpbPhase::Ready | TpbPhase::Acting)
        })?;
        let gauge = &mut battler.gauge;
        gauge.phase = TpbPhase::Charging;
        gauge.charge = 0.0;
        gauge.cast = 0.0;
        gauge.idle = 0.0;
        battler.clear_actions();
        Ok(())
    }

    /// Applies or lifts a movement restriction.
    ///
    /// Becoming restricted drops any chosen action and empties the gauge.
    pub fn set_restricted(&mut self, id: BattlerId, restricted: bool) -> Result<(), EngineError> {
        let battler = self.battler_mut(id)?;
        if restricted && !battler.restricted {
            battler.gauge.phase = TpbPhase::Charging;
            battler.gauge.charge = 0.0;
            battler.gauge.cast = 0.0;
            battler.clear_actions();
        }
        battler.restricted = restricted;
        Ok(())
    }

    pub fn fill_rate(&self, env: &BattleEnv<'_>, id: BattlerId) -> Result<f64, EngineError> {
        self.state.fill_rate(env, id)
    }

    pub fn required_cast_time(
        &self,
        env: &BattleEnv<'_>,
        id: BattlerId,
    ) -> Result<f64, EngineError> {
        self.state.required_cast_time(env, id)
    }

    fn battler_mut(&mut self, id: BattlerId) -> Result<&mut Battler, EngineError> {
        self.state
            .roster
            .get_mut(id)
            .ok_or(EngineError::BattlerNotFound(id))
    }
}

impl BattleState {
    /// Per-frame fill rate of a battler under the environment's speed model.
    pub fn fill_rate(&self, env: &BattleEnv<'_>, id: BattlerId) -> Result<f64, EngineError> {
        let (battler, spread) = self.battler_with_spread(id)?;
        Ok(env.speed().fill_rate(battler.agility(), spread))
    }

    /// Delay the battler's valid queued actions require, in gauge units.
    pub fn required_cast_time(
        &self,
        env: &BattleEnv<'_>,
        id: BattlerId,
    ) -> Result<f64, EngineError> {
        let (battler, spread) = self.battler_with_spread(id)?;
        Ok(required_cast_time_with(
            env.speed(),
            battler,
            spread,
            env.config().cast_time,
        ))
    }

    fn battler_with_spread(&self, id: BattlerId) -> Result<(&Battler, AgilitySpread), EngineError> {
        let battler = self
            .roster
            .get(id)
            .ok_or(EngineError::BattlerNotFound(id))?;
        let spread = self.roster.agility_spread()?;
        Ok((battler, spread))
    }
}

fn expect_phase(
    battler: &Battler,
    expected: &'static str,
    accept: impl Fn(TpbPhase) -> bool,
) -> Result<(), EngineError> {
    if accept(battler.gauge.phase) {
        Ok(())
    } else {
        Err(EngineError::UnexpectedPhase {
            battler: battler.id,
            expected,
            actual: battler.gauge.phase,
        })
    }
}

fn run_hooks(
    hooks: &[Arc<dyn TickHook>],
    battler: &mut Battler,
    env: &BattleEnv<'_>,
    spread: AgilitySpread,
    mode: TimingMode,
    frame: Frame,
    events: &mut Vec<BattleEvent>,
) -> Result<(), HookFailure> {
    let id = battler.id;
    let mut ctx = TickContext::new(battler, env, spread, mode, frame, events);
    for hook in hooks {
        if !hook.should_run(ctx.battler) {
            continue;
        }
        hook.apply(&mut ctx).map_err(|error| HookFailure {
            battler: id,
            hook: hook.name(),
            criticality: hook.criticality(),
            error,
        })?;
    }
    Ok(())
}
