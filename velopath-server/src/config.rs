//! Server configuration loaded from a TOML file

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use velopath_core::Error as CoreError;
use velopath_core::loading::{SimulationConfig, StreetModelConfig};
use velopath_core::routing::Weights;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path to the OSM XML extract served by this instance
    pub osm_path: PathBuf,
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

fn default_listen() -> SocketAddr {
    ([127, 0, 0, 1], 5000).into()
}

impl ServerConfig {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn model_config(&self) -> StreetModelConfig {
        StreetModelConfig {
            osm_path: self.osm_path.clone(),
            simulation: self.simulation,
        }
    }
}

/// Cost weights applied to every route request. The engine itself
/// imposes no default; this service defaults to distance plus a strong
/// safety penalty, with elevation off.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub distance: f64,
    pub elevation: f64,
    pub safety: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            distance: 1.0,
            elevation: 0.0,
            safety: 1000.0,
        }
    }
}

impl WeightConfig {
    pub fn to_weights(self) -> Result<Weights, CoreError> {
        Weights::new(self.distance, self.elevation, self.safety)
    }
}

/// Photon-compatible forward-geocoding endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    /// Appended to every query to keep results inside the served
    /// region, e.g. `"Región Metropolitana, Chile"`
    pub region_suffix: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://photon.komoot.io/api/".to_string(),
            region_suffix: String::new(),
            timeout_secs: 10,
        }
    }
}
