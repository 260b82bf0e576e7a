//! Spatial nearest-node lookup

use std::fmt;

use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::NodeId;
use crate::model::StreetGraph;
use crate::routing::haversine;

/// R-tree entry: node position in degrees carrying its graph id
pub type IndexedPoint = GeomWithData<[f64; 2], NodeId>;

/// Spatial index over graph nodes for click-to-node resolution
#[derive(Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    pub fn build(graph: &StreetGraph) -> Self {
        let points = graph
            .nodes()
            .map(|node| IndexedPoint::new([node.lon(), node.lat()], node.id))
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Nearest node within `max_dist_m` meters of the coordinate,
    /// `None` when nothing is close enough. The tree ranks candidates
    /// in degree space, which matches the metric ranking at city
    /// extents; the acceptance check itself is in meters.
    pub fn nearest_node(&self, lat: f64, lon: f64, max_dist_m: f64) -> Option<NodeId> {
        let found = self.tree.nearest_neighbor(&[lon, lat])?;
        let [found_lon, found_lat] = *found.geom();
        (haversine(lat, lon, found_lat, found_lon) <= max_dist_m).then_some(found.data)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}
