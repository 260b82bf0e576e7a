//! Street network components - nodes and edges

use geo::Point;
use hashbrown::{HashMap, HashSet};

use crate::{EdgeId, NodeId};

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
    /// Altitude above sea level in meters
    pub altitude_m: f64,
    /// Probability of an accident on segments arriving at this node
    pub accident_prob: f64,
    /// Raw OSM tags; carries grouping attributes such as `comuna`
    pub tags: HashMap<String, String>,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) neighbors: Vec<NodeId>,
}

impl StreetNode {
    pub(crate) fn new(
        id: NodeId,
        lat: f64,
        lon: f64,
        altitude_m: f64,
        accident_prob: f64,
    ) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
            altitude_m,
            accident_prob,
            tags: HashMap::new(),
            edges: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    /// Edges incident to this node, registered by `StreetGraph::add_edge`
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Nodes one hop away. Populated only as a side effect of edge
    /// registration and exposed for inspection, never mutated directly.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// Street graph edge (directed street segment)
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Edge ID, unique within the graph
    pub id: EdgeId,
    /// Endpoint pair. Order carries no traversal meaning: either
    /// endpoint may act as the origin during a search.
    pub endpoints: (NodeId, NodeId),
    /// Whether the segment carries dedicated cycling infrastructure
    pub bike_lane: bool,
    /// Attenuates the safety penalty; treated as at least 1 wherever
    /// it divides
    pub importance: i32,
    pub(crate) neighbor_edges: HashSet<EdgeId>,
}

impl StreetEdge {
    /// Returns the endpoint opposite `node`, or `None` when `node` is
    /// not an endpoint of this edge.
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        let (a, b) = self.endpoints;
        if node == a {
            Some(b)
        } else if node == b {
            Some(a)
        } else {
            None
        }
    }

    /// Edges sharing an endpoint with this one. Maintained during
    /// registration as an extension point for turn restrictions;
    /// consulted by no search algorithm.
    pub fn neighbor_edges(&self) -> &HashSet<EdgeId> {
        &self.neighbor_edges
    }
}
