use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for building a street model
#[derive(Debug, Clone, Deserialize)]
pub struct StreetModelConfig {
    /// Path to the OSM XML extract
    pub osm_path: PathBuf,
    /// Synthetic-attribute settings for extracts without elevation or
    /// safety data
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Controls the synthesis of altitude and accident-probability
/// attributes at load time. Seeded, so repeated loads of the same
/// extract produce the same model.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub enabled: bool,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: 0,
        }
    }
}
