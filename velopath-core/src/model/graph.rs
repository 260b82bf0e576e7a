//! Street graph held as id-keyed node and edge maps

use hashbrown::{HashMap, HashSet};
use log::info;
use serde::Deserialize;

use super::components::{StreetEdge, StreetNode};
use crate::{EdgeId, Error, NodeId};

/// Bulk node input record
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub altitude_m: f64,
    #[serde(default)]
    pub accident_prob: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl NodeRecord {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            lat,
            lon,
            altitude_m: 0.0,
            accident_prob: 0.0,
            tags: HashMap::new(),
        }
    }
}

/// Bulk input record for one undirected street segment
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub endpoint_a: NodeId,
    pub endpoint_b: NodeId,
    #[serde(default)]
    pub bike_lane: bool,
    #[serde(default = "default_importance")]
    pub importance: i32,
}

fn default_importance() -> i32 {
    1
}

impl EdgeRecord {
    pub fn new(id: EdgeId, endpoint_a: NodeId, endpoint_b: NodeId) -> Self {
        Self {
            id,
            endpoint_a,
            endpoint_b,
            bike_lane: false,
            importance: 1,
        }
    }
}

/// Directed street graph owning its nodes and edges
#[derive(Debug, Clone, Default)]
pub struct StreetGraph {
    nodes: HashMap<NodeId, StreetNode>,
    edges: HashMap<EdgeId, StreetEdge>,
}

impl StreetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&StreetNode> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&StreetEdge> {
        self.edges.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StreetNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &StreetEdge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts a node. Idempotent: a duplicate id leaves the original
    /// node untouched and returns it.
    pub fn add_node(
        &mut self,
        id: NodeId,
        lat: f64,
        lon: f64,
        altitude_m: f64,
        accident_prob: f64,
    ) -> &StreetNode {
        self.nodes
            .entry(id)
            .or_insert_with(|| StreetNode::new(id, lat, lon, altitude_m, accident_prob))
    }

    /// Inserts an edge between two existing nodes and registers it on
    /// both endpoints, which makes it discoverable (and traversable)
    /// from either side. Idempotent on a duplicate edge id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEndpoint`] when either endpoint id is
    /// absent; nothing already inserted is affected.
    pub fn add_edge(
        &mut self,
        id: EdgeId,
        endpoint_a: NodeId,
        endpoint_b: NodeId,
        bike_lane: bool,
        importance: i32,
    ) -> Result<&StreetEdge, Error> {
        for endpoint in [endpoint_a, endpoint_b] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(Error::MissingEndpoint {
                    edge: id,
                    node: endpoint,
                });
            }
        }

        if !self.edges.contains_key(&id) {
            self.edges.insert(
                id,
                StreetEdge {
                    id,
                    endpoints: (endpoint_a, endpoint_b),
                    bike_lane,
                    importance,
                    neighbor_edges: HashSet::new(),
                },
            );
            self.register_edge(id, endpoint_a, endpoint_b);
        }

        Ok(&self.edges[&id])
    }

    /// Registers `id` on the incident-edge list of both endpoints,
    /// derives their adjacency, and links edges sharing an endpoint.
    fn register_edge(&mut self, id: EdgeId, endpoint_a: NodeId, endpoint_b: NodeId) {
        let mut siblings: Vec<EdgeId> = Vec::new();

        for (own, other) in [(endpoint_a, endpoint_b), (endpoint_b, endpoint_a)] {
            if let Some(node) = self.nodes.get_mut(&own) {
                siblings.extend(node.edges.iter().copied().filter(|&e| e != id));
                if !node.edges.contains(&id) {
                    node.edges.push(id);
                }
                if !node.neighbors.contains(&other) {
                    node.neighbors.push(other);
                }
            }
        }

        for sibling in siblings {
            if let Some(edge) = self.edges.get_mut(&sibling) {
                edge.neighbor_edges.insert(id);
            }
            if let Some(edge) = self.edges.get_mut(&id) {
                edge.neighbor_edges.insert(sibling);
            }
        }
    }

    /// Populates the graph from bulk records. Each physical segment
    /// record with id `k` materializes two directed edges, `2k` (a, b)
    /// and `2k + 1` (b, a); a single edge is already traversable from
    /// either endpoint, so the duplication leaves one-hop reachability
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEndpoint`] when a segment references a
    /// node id absent from `nodes`.
    pub fn bulk_load(
        &mut self,
        nodes: impl IntoIterator<Item = NodeRecord>,
        edges: impl IntoIterator<Item = EdgeRecord>,
    ) -> Result<(), Error> {
        for rec in nodes {
            if let hashbrown::hash_map::Entry::Vacant(entry) = self.nodes.entry(rec.id) {
                let mut node =
                    StreetNode::new(rec.id, rec.lat, rec.lon, rec.altitude_m, rec.accident_prob);
                node.tags = rec.tags;
                entry.insert(node);
            }
        }

        for rec in edges {
            let forward = rec.id * 2;
            self.add_edge(
                forward,
                rec.endpoint_a,
                rec.endpoint_b,
                rec.bike_lane,
                rec.importance,
            )?;
            self.add_edge(
                forward + 1,
                rec.endpoint_b,
                rec.endpoint_a,
                rec.bike_lane,
                rec.importance,
            )?;
        }

        Ok(())
    }

    /// Overwrites `accident_prob` on every node whose grouping tag
    /// (looked up under `attribute`, case-insensitively) matches one of
    /// the score keys after trimming and case folding. Nodes without
    /// the tag, or whose group has no score, are left untouched.
    /// Returns the number of nodes updated.
    pub fn assign_safety_scores<'a>(
        &mut self,
        scores: impl IntoIterator<Item = (&'a str, f64)>,
        attribute: &str,
    ) -> usize {
        let normalized: HashMap<String, f64> = scores
            .into_iter()
            .map(|(group, score)| (group.trim().to_uppercase(), score))
            .collect();

        let mut updated = 0;
        for node in self.nodes.values_mut() {
            let group = node
                .tags
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(attribute))
                .map(|(_, value)| value);
            let Some(group) = group else { continue };

            if let Some(&score) = normalized.get(&group.trim().to_uppercase()) {
                node.accident_prob = score;
                updated += 1;
            }
        }

        info!("Assigned safety scores to {updated} nodes via attribute `{attribute}`");
        updated
    }
}
