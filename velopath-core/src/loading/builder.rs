use log::info;

use super::config::StreetModelConfig;
use super::osm;
use super::simulation;
use crate::Error;
use crate::model::{StreetGraph, StreetModel};
use crate::resolve::{SpatialIndex, StreetDirectory};

/// Creates a street model based on the provided configuration
///
/// # Errors
///
/// Returns an error if the OSM extract is missing or malformed.
pub fn create_street_model(config: &StreetModelConfig) -> Result<StreetModel, Error> {
    validate_config(config)?;

    info!(
        "Processing street data (OSM): {}",
        config.osm_path.display()
    );
    let extract = osm::parse_osm_file(&config.osm_path)?;
    info!(
        "Parsed {} nodes and {} ways",
        extract.nodes.len(),
        extract.ways.len()
    );

    let (mut node_records, edge_records, named_ways) = osm::build_records(&extract);

    if config.simulation.enabled {
        simulation::simulate_attributes(&mut node_records, config.simulation.seed);
    }

    let mut graph = StreetGraph::new();
    graph.bulk_load(node_records, edge_records)?;
    info!(
        "Street graph ready: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let spatial_index = SpatialIndex::build(&graph);
    let streets = StreetDirectory::new(named_ways);
    info!("Indexed {} named ways for resolution", streets.len());

    Ok(StreetModel::new(graph, spatial_index, streets))
}

fn validate_config(config: &StreetModelConfig) -> Result<(), Error> {
    if !config.osm_path.exists() {
        return Err(Error::InvalidData(format!(
            "OSM file not found: {}",
            config.osm_path.display()
        )));
    }
    Ok(())
}
