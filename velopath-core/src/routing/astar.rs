//! Goal-directed A* search
//!
//! The heuristic is the weighted great-circle distance to the goal and
//! deliberately ignores the elevation and safety cost components. That
//! keeps it admissible - and the returned path optimal - only while
//! both of those weights are zero; with non-zero elevation or safety
//! weights the search still terminates with a valid path but without an
//! optimality guarantee. Known limitation, kept as-is.

use std::collections::BinaryHeap;

use hashbrown::HashMap;

use super::cost::{Weights, edge_cost, haversine};
use super::path::reconstruct_path;
use super::state::State;
use crate::model::StreetGraph;
use crate::{Error, NodeId};

/// A* from `start` to `goal`. Returns the node sequence of the found
/// route, or `None` when the queue drains without reaching the goal -
/// an unreachable goal is an answer, not an error.
///
/// # Errors
///
/// Returns [`Error::UnknownNode`] when either id is not in the graph.
pub fn a_star(
    graph: &StreetGraph,
    start: NodeId,
    goal: NodeId,
    weights: &Weights,
) -> Result<Option<Vec<NodeId>>, Error> {
    let start_node = graph.node(start).ok_or(Error::UnknownNode(start))?;
    let goal_node = graph.node(goal).ok_or(Error::UnknownNode(goal))?;

    let heuristic = |lat: f64, lon: f64| {
        weights.distance * haversine(lat, lon, goal_node.lat(), goal_node.lon())
    };

    let mut g_score: HashMap<NodeId, f64> = graph.nodes().map(|n| (n.id, f64::INFINITY)).collect();
    let mut f_score: HashMap<NodeId, f64> = graph.nodes().map(|n| (n.id, f64::INFINITY)).collect();
    let mut came_from: HashMap<NodeId, Option<NodeId>> =
        graph.nodes().map(|n| (n.id, None)).collect();

    g_score.insert(start, 0.0);
    f_score.insert(start, heuristic(start_node.lat(), start_node.lon()));

    let mut open = BinaryHeap::new();
    open.push(State {
        cost: f_score[&start],
        node: start,
    });

    while let Some(State { node, .. }) = open.pop() {
        if node == goal {
            return Ok(Some(reconstruct_path(&came_from, start, goal)));
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

            let tentative = g_score[&node] + edge_cost(edge, current, next, weights);
            if tentative < g_score[&next_id] {
                came_from.insert(next_id, Some(node));
                g_score.insert(next_id, tentative);
                f_score.insert(next_id, tentative + heuristic(next.lat(), next.lon()));
                open.push(State {
                    cost: f_score[&next_id],
                    node: next_id,
                });
            }
        }
    }

    Ok(None)
}
