// Re-export key components
pub use crate::error::Error;
pub use crate::loading::{SimulationConfig, StreetModelConfig, create_street_model};
pub use crate::model::{EdgeRecord, NodeRecord, StreetEdge, StreetGraph, StreetModel, StreetNode};
pub use crate::resolve::{NamedWay, ResolveQuery, SpatialIndex, StreetDirectory};
pub use crate::routing::{
    ShortestPathTree, Weights, a_star, dijkstra, edge_cost, haversine, reconstruct_path,
};

// Core identifier types
pub use crate::{EdgeId, MAX_SNAP_DISTANCE, NodeId};
