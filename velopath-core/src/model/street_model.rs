//! Loaded street model: the graph plus its resolution indexes

use crate::model::StreetGraph;
use crate::resolve::{SpatialIndex, StreetDirectory};
use crate::{MAX_SNAP_DISTANCE, NodeId};

/// Fully loaded routing model, built once at startup by the loading
/// builder and passed by handle to every search. The graph is logically
/// immutable while a search runs; callers that interleave mutation
/// (safety-score assignment) with searches must serialize the two, for
/// example behind a read/write lock.
#[derive(Debug, Clone)]
pub struct StreetModel {
    pub graph: StreetGraph,
    pub spatial_index: SpatialIndex,
    pub streets: StreetDirectory,
}

impl StreetModel {
    pub fn new(graph: StreetGraph, spatial_index: SpatialIndex, streets: StreetDirectory) -> Self {
        Self {
            graph,
            spatial_index,
            streets,
        }
    }

    /// Nearest graph node within the default snap radius of a
    /// coordinate, `None` when nothing is close enough.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<NodeId> {
        self.spatial_index.nearest_node(lat, lon, MAX_SNAP_DISTANCE)
    }

    /// Node where two named streets cross.
    pub fn find_intersection(&self, street_a: &str, street_b: &str) -> Option<NodeId> {
        self.streets
            .find_intersection(&self.graph, street_a, street_b)
    }
}
