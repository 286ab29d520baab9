//! Plugin parameter loader.

use std::path::Path;

use tpb_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};
use crate::params::PluginParameters;

#[derive(serde::Deserialize)]
struct ParameterFile {
    #[serde(default)]
    parameters: PluginParameters,
}

/// Loader for plugin parameters from TOML files.
///
/// The file carries a single `[parameters]` table of string values:
///
/// ```toml
/// [parameters]
/// Proportionation = "false"
/// OneCourseDivHP = "6"
/// chargeMAX_SE = "Bell3"
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load raw parameters from a TOML file.
    pub fn load_parameters(path: &Path) -> LoadResult<PluginParameters> {
        let content = read_file(path)?;
        Self::parse_parameters(&content)
    }

    /// Parse raw parameters from TOML text.
    pub fn parse_parameters(content: &str) -> LoadResult<PluginParameters> {
        let file: ParameterFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse parameter TOML: {}", e))?;
        Ok(file.parameters)
    }

    /// Load parameters and resolve them into a battle configuration.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        Ok(Self::load_parameters(path)?.to_config())
    }
}
