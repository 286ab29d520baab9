//! Deterministic time-progress battle rules shared by the runtime and tools.
//!
//! `tpb-core` defines the gauge fill-rate model, cast-time derivation and the
//! fractional slip (regeneration over time) accumulator, together with the
//! battler/roster state they operate on. All per-frame mutation flows through
//! [`engine::BattleEngine`], which runs an ordered list of [`engine::TickHook`]
//! strategies for every battler.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod presentation;
pub mod slip;
pub mod speed;
pub mod state;
pub mod stats;
pub mod timing;

pub use config::{BattleConfig, CastTimeMode, SlipConfig};
pub use engine::{
    BattleEngine, BattleEvent, CastHook, ChargeHook, EngineError, HookCriticality, HookFailure,
    IdleHook, SlipHook, TickContext, TickError, TickHook, TickReport, default_hooks,
};
pub use env::{BattleEnv, VariableId, VariableOracle};
pub use error::{BattleError, ErrorSeverity};
pub use presentation::{SoundCue, should_mirror};
pub use slip::{
    SlipApplication, SlipCeiling, SlipMeter, SlipState, StandardSlipCeiling, advance_slip,
};
pub use speed::{
    AgilitySpread, ClassicSpeed, SpeedError, SpeedModel, SpeedModelKind, SpreadNormalizedSpeed,
    base_fill_rate, fill_rate, required_cast_time,
};
pub use state::{
    BattleState, Battler, BattlerId, Frame, ItemDefinition, QueuedAction, ResourceChange,
    ResourceKind, ResourceMeter, ResourceMeters, Roster, Side, TpbGauge, TpbPhase, TraitSource,
    TraitSourceKind,
};
pub use stats::{Agility, Bonus, BonusStack, StatBounds};
pub use timing::{ModeTiming, TimingConfig, TimingMode};
