//! Free-text street and intersection resolution against named ways

use rayon::prelude::*;

use crate::model::StreetGraph;
use crate::routing::haversine;
use crate::{MAX_SNAP_DISTANCE, NodeId};

/// A named OSM way and the nodes it passes through
#[derive(Debug, Clone)]
pub struct NamedWay {
    pub name: String,
    pub nodes: Vec<NodeId>,
}

/// Directory of named ways for text-based lookups
#[derive(Debug, Clone, Default)]
pub struct StreetDirectory {
    ways: Vec<NamedWay>,
}

impl StreetDirectory {
    pub fn new(ways: Vec<NamedWay>) -> Self {
        Self { ways }
    }

    pub fn len(&self) -> usize {
        self.ways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ways.is_empty()
    }

    /// All node ids of ways whose name contains `query`, sorted and
    /// deduplicated. Matching is case-insensitive substring, like the
    /// queries users type.
    fn matching_nodes(&self, query: &str) -> Vec<NodeId> {
        let needle = query.to_lowercase();
        let mut nodes: Vec<NodeId> = self
            .ways
            .iter()
            .filter(|way| way.name.to_lowercase().contains(&needle))
            .flat_map(|way| way.nodes.iter().copied())
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// Node where two named streets cross. A node shared by both
    /// streets wins (smallest id for a stable answer); otherwise the
    /// closest pair of nodes across the two streets is accepted when it
    /// lies within the snap radius, yielding the first street's node.
    pub fn find_intersection(
        &self,
        graph: &StreetGraph,
        street_a: &str,
        street_b: &str,
    ) -> Option<NodeId> {
        let nodes_a = self.matching_nodes(street_a);
        let nodes_b = self.matching_nodes(street_b);
        if nodes_a.is_empty() || nodes_b.is_empty() {
            return None;
        }

        if let Some(&shared) = nodes_a
            .iter()
            .find(|id| nodes_b.binary_search(id).is_ok())
        {
            return Some(shared);
        }

        let (best_dist, best_node) = nodes_a
            .par_iter()
            .filter_map(|&a| {
                let node_a = graph.node(a)?;
                nodes_b
                    .iter()
                    .filter_map(|&b| {
                        let node_b = graph.node(b)?;
                        let dist = haversine(
                            node_a.lat(),
                            node_a.lon(),
                            node_b.lat(),
                            node_b.lon(),
                        );
                        Some((dist, a))
                    })
                    .min_by(|x, y| x.0.total_cmp(&y.0).then_with(|| x.1.cmp(&y.1)))
            })
            .min_by(|x, y| x.0.total_cmp(&y.0).then_with(|| x.1.cmp(&y.1)))?;

        (best_dist <= MAX_SNAP_DISTANCE).then_some(best_node)
    }
}
