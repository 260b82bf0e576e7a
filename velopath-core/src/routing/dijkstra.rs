//! Dijkstra search over the street graph

use std::collections::BinaryHeap;

use hashbrown::HashMap;

use super::cost::{Weights, edge_cost};
use super::state::State;
use crate::model::StreetGraph;
use crate::{Error, NodeId};

/// Distance and predecessor maps over every node of the graph. Nodes
/// the search never reached keep an infinite distance and no
/// predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub distances: HashMap<NodeId, f64>,
    pub predecessors: HashMap<NodeId, Option<NodeId>>,
}

impl ShortestPathTree {
    /// Best known cost from the start to `node`, infinite when the node
    /// was never reached (or is not part of the graph).
    pub fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }
}

/// Dijkstra's algorithm over the composite edge cost, from `start` to
/// every reachable node, or until `goal` is settled when one is given.
///
/// The priority queue uses lazy deletion: improving a node pushes a
/// fresh entry and the superseded one is discarded when popped. All
/// edge costs are non-negative by construction of [`Weights`], which is
/// what makes settling on pop correct.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] when `start` is not in the graph.
pub fn dijkstra(
    graph: &StreetGraph,
    start: NodeId,
    goal: Option<NodeId>,
    weights: &Weights,
) -> Result<ShortestPathTree, Error> {
    if !graph.contains_node(start) {
        return Err(Error::UnknownNode(start));
    }

    let mut distances: HashMap<NodeId, f64> =
        graph.nodes().map(|n| (n.id, f64::INFINITY)).collect();
    let mut predecessors: HashMap<NodeId, Option<NodeId>> =
        graph.nodes().map(|n| (n.id, None)).collect();
    distances.insert(start, 0.0);

    let mut heap = BinaryHeap::new();
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry superseded by a later improvement
        if cost > distances[&node] {
            continue;
        }
        // The goal is final once popped
        if goal == Some(node) {
            break;
        }

        let Some(current) = graph.node(node) else {
            continue;
        };
        for &edge_id in current.edges() {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let Some(next_id) = edge.opposite(node) else {
                continue;
            };
            let Some(next) = graph.node(next_id) else {
                continue;
            };

            let next_cost = cost + edge_cost(edge, current, next, weights);
            if next_cost < distances[&next_id] {
                distances.insert(next_id, next_cost);
                predecessors.insert(next_id, Some(node));
                heap.push(State {
                    cost: next_cost,
                    node: next_id,
                });
            }
        }
    }

    Ok(ShortestPathTree {
        distances,
        predecessors,
    })
}
