//! High-level runtime orchestrator.
//!
//! The runtime owns the battle state together with everything the tick engine
//! consults (configuration, speed model, slip ceiling, game variables) and
//! exposes a builder-based API for hosts to drive the battle frame by frame.

use std::sync::Arc;

use tpb_content::PluginParameters;
use tpb_core::{
    BattleConfig, BattleEngine, BattleEnv, BattleEvent, BattleState, Battler, BattlerId,
    EngineError, ItemDefinition, QueuedAction, Roster, SlipCeiling, SpeedModelKind,
    StandardSlipCeiling, TickReport, TimingMode, TraitSource, VariableId,
};
use tracing::{debug, info, trace};

use crate::cues::CueSink;
use crate::error::{Result, RuntimeError};
use crate::hooks::HookRegistry;
use crate::oracle::{GameVariables, VariableValue};

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub speed_model: SpeedModelKind,
    pub initial_mode: TimingMode,
}

impl RuntimeConfig {
    pub fn from_parameters(params: &PluginParameters) -> Self {
        Self {
            battle: params.to_config(),
            ..Self::default()
        }
    }
}

/// Owns one engagement and drives it frame by frame.
pub struct BattleRuntime {
    config: RuntimeConfig,
    state: BattleState,
    variables: GameVariables,
    hooks: HookRegistry,
    ceiling: Arc<dyn SlipCeiling>,
    cue_sinks: Vec<Arc<dyn CueSink>>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn battler(&self, id: BattlerId) -> Option<&Battler> {
        self.state.roster.get(id)
    }

    /// Direct access for host-side adjustments such as agility buffs.
    pub fn battler_mut(&mut self, id: BattlerId) -> Result<&mut Battler> {
        self.state
            .roster
            .get_mut(id)
            .ok_or(RuntimeError::Engine(EngineError::BattlerNotFound(id)))
    }

    pub fn variables(&self) -> &GameVariables {
        &self.variables
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Advances the battle by one frame.
    ///
    /// A critical hook failure discards the whole frame and leaves the state
    /// as it was before the call.
    pub fn step(&mut self) -> Result<TickReport> {
        let snapshot = self.state.clone();

        let env = BattleEnv::new(
            &self.config.battle,
            self.config.speed_model.model(),
            self.ceiling.as_ref(),
        )
        .with_variables(&self.variables);
        let report = BattleEngine::new(&mut self.state).tick(&env, self.hooks.hooks())?;

        if let Err(err) = self.hooks.handle_failures(&report.failures) {
            self.state = snapshot;
            return Err(err);
        }

        trace!(
            target: "runtime::tick",
            frame = report.frame.0,
            events = report.events.len(),
            failures = report.failures.len(),
            "Frame advanced"
        );
        for event in &report.events {
            self.dispatch(event);
        }
        for id in &report.removed {
            info!(target: "runtime::tick", battler = %id, "Battler removed");
        }

        Ok(report)
    }

    /// Runs `frames` frames and returns every event in order.
    pub fn run(&mut self, frames: u64) -> Result<Vec<BattleEvent>> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(self.step()?.events);
        }
        Ok(events)
    }

    fn dispatch(&self, event: &BattleEvent) {
        match event {
            BattleEvent::GaugeFull { battler, side } => {
                debug!(target: "runtime::tick", battler = %battler, ?side, "Gauge full");
                if !side.is_party() {
                    return;
                }
                if let Some(cue) = &self.config.battle.charge_cue {
                    for sink in &self.cue_sinks {
                        sink.play(*battler, cue);
                    }
                }
            }
            BattleEvent::CastComplete { battler } => {
                debug!(target: "runtime::tick", battler = %battler, "Cast complete");
            }
            BattleEvent::SlipApplied {
                battler,
                resource,
                amount,
                change,
            } => {
                trace!(
                    target: "runtime::tick",
                    battler = %battler,
                    resource = resource.label(),
                    amount,
                    applied = change.applied(),
                    "Slip applied"
                );
            }
            BattleEvent::Defeated { battler, side } => {
                info!(target: "runtime::tick", battler = %battler, ?side, "Defeated by slip");
            }
        }
    }

    fn engine(&mut self) -> BattleEngine<'_> {
        BattleEngine::new(&mut self.state)
    }

    fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(
            &self.config.battle,
            self.config.speed_model.model(),
            self.ceiling.as_ref(),
        )
        .with_variables(&self.variables)
    }

    pub fn mode(&self) -> TimingMode {
        self.state.mode
    }

    pub fn set_mode(&mut self, mode: TimingMode) {
        self.engine().set_mode(mode);
    }

    /// Sets a game variable; cycle overrides pick it up on the next frame.
    pub fn set_variable(&mut self, id: VariableId, value: impl Into<VariableValue>) {
        self.variables.set(id, value);
    }

    pub fn add_battler(&mut self, battler: Battler) -> Result<()> {
        Ok(self.engine().add(battler)?)
    }

    pub fn remove_battler(&mut self, id: BattlerId) -> Result<Battler> {
        Ok(self.engine().remove(id)?)
    }

    pub fn queue_action(&mut self, id: BattlerId, item: ItemDefinition) -> Result<()> {
        Ok(self.engine().queue_action(id, QueuedAction::new(item))?)
    }

    pub fn invalidate_actions(&mut self, id: BattlerId) -> Result<()> {
        Ok(self.engine().invalidate_actions(id)?)
    }

    pub fn begin_casting(&mut self, id: BattlerId) -> Result<()> {
        Ok(self.engine().begin_casting(id)?)
    }

    pub fn start_action(&mut self, id: BattlerId) -> Result<()> {
        Ok(self.engine().start_action(id)?)
    }

    pub fn finish_action(&mut self, id: BattlerId) -> Result<()> {
        Ok(self.engine().finish_action(id)?)
    }

    pub fn set_restricted(&mut self, id: BattlerId, restricted: bool) -> Result<()> {
        Ok(self.engine().set_restricted(id, restricted)?)
    }

    pub fn add_trait_source(&mut self, id: BattlerId, source: TraitSource) -> Result<()> {
        self.battler_mut(id)?.add_trait_source(source);
        Ok(())
    }

    /// Removes every trait source named `name`; returns how many were removed.
    pub fn remove_trait_source(&mut self, id: BattlerId, name: &str) -> Result<usize> {
        Ok(self.battler_mut(id)?.remove_trait_source(name))
    }

    pub fn fill_rate(&self, id: BattlerId) -> Result<f64> {
        Ok(self.state.fill_rate(&self.env(), id)?)
    }

    pub fn required_cast_time(&self, id: BattlerId) -> Result<f64> {
        Ok(self.state.required_cast_time(&self.env(), id)?)
    }

    /// Frames in the current mode's reference cycle.
    pub fn cycle_length(&self) -> f64 {
        self.env().cycle_length(self.state.mode)
    }
}

/// Builder for [`BattleRuntime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Roster>,
    variables: GameVariables,
    hooks: Option<HookRegistry>,
    ceiling: Option<Arc<dyn SlipCeiling>>,
    cue_sinks: Vec<Arc<dyn CueSink>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            variables: GameVariables::new(),
            hooks: None,
            ceiling: None,
            cue_sinks: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the battle configuration with one built from host parameters.
    pub fn parameters(mut self, params: &PluginParameters) -> Self {
        self.config.battle = params.to_config();
        self
    }

    pub fn speed_model(mut self, kind: SpeedModelKind) -> Self {
        self.config.speed_model = kind;
        self
    }

    pub fn mode(mut self, mode: TimingMode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    /// Provide the roster (required)
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn variables(mut self, variables: GameVariables) -> Self {
        self.variables = variables;
        self
    }

    /// Set custom tick hooks.
    ///
    /// If not provided, the default hooks (charge, cast, idle, slip) are used.
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Override the slip damage ceiling.
    ///
    /// Defaults to [`StandardSlipCeiling`] following the configured slip death.
    pub fn slip_ceiling(mut self, ceiling: Arc<dyn SlipCeiling>) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn cue_sink(mut self, sink: Arc<dyn CueSink>) -> Self {
        self.cue_sinks.push(sink);
        self
    }

    pub fn build(self) -> Result<BattleRuntime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;
        let ceiling = self.ceiling.unwrap_or_else(|| {
            Arc::new(StandardSlipCeiling::new(self.config.battle.slip.slip_death))
        });
        let state = BattleState::new(roster).with_mode(self.config.initial_mode);

        info!(
            target: "runtime::tick",
            battlers = state.roster.len(),
            speed_model = self.config.speed_model.model().name(),
            mode = ?state.mode,
            "Battle runtime ready"
        );

        Ok(BattleRuntime {
            config: self.config,
            state,
            variables: self.variables,
            hooks: self.hooks.unwrap_or_default(),
            ceiling,
            cue_sinks: self.cue_sinks,
        })
    }
}
