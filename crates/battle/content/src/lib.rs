//! Data-driven battle content and loaders.
//!
//! This crate turns host-authored data into `tpb-core` values:
//! - Plugin parameters (string key/value pairs) into a [`tpb_core::BattleConfig`]
//! - Parameter files (data-driven via TOML)
//! - Rosters with trait sources and skills (data-driven via RON)
//!
//! Content is consumed when an engagement starts and never appears in battle
//! state afterwards.

pub mod params;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use params::PluginParameters;

#[cfg(feature = "loaders")]
pub use loaders::{BattlerSpec, ConfigLoader, LoadedRoster, RosterLoader, RosterSpec, SourceSpec};
