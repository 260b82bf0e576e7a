//! Core engine for velopath: weighted, multi-criteria shortest paths
//! over a street network derived from OpenStreetMap data.
//!
//! The crate owns the graph data model ([`model`]), the OSM loading
//! pipeline ([`loading`]), the Dijkstra and A* searches with their
//! composite cost function ([`routing`]), and the text/coordinate to
//! node resolution indexes ([`resolve`]). Network-facing concerns
//! (HTTP endpoints, external geocoding) live in the server crate.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod resolve;
pub mod routing;

pub use error::Error;

/// Graph node identifier, matching the OSM node id space.
pub type NodeId = i64;
/// Directed edge identifier.
pub type EdgeId = i64;

/// Acceptance radius in meters when snapping a coordinate or an
/// approximate street crossing to a graph node.
pub const MAX_SNAP_DISTANCE: f64 = 100.0;
