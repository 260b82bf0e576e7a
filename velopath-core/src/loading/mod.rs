//! This module is responsible for loading OSM street data and
//! building the routing model.

mod builder;
mod config;
pub mod osm;
mod simulation;

pub use builder::create_street_model;
pub use config::{SimulationConfig, StreetModelConfig};
