//! End-to-end routing scenarios over small hand-built graphs

use velopath_core::model::{EdgeRecord, NodeRecord, StreetGraph};
use velopath_core::routing::{
    Weights, a_star, dijkstra, edge_cost, haversine, reconstruct_path,
};
use velopath_core::NodeId;

/// Four nodes on a ~111 m square, consecutive corners connected:
///
/// ```text
/// 1 (0, 0.001) --- 2 (0.001, 0.001)
/// |                 |
/// 0 (0, 0)     --- 3 (0.001, 0)
/// ```
fn square(accident_probs: [f64; 4]) -> StreetGraph {
    let coords = [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)];
    let nodes = coords
        .iter()
        .zip(accident_probs)
        .enumerate()
        .map(|(id, (&(lat, lon), accident_prob))| {
            let mut record = NodeRecord::new(id as NodeId, lat, lon);
            record.accident_prob = accident_prob;
            record
        })
        .collect::<Vec<_>>();
    let edges = vec![
        EdgeRecord::new(0, 0, 1),
        EdgeRecord::new(1, 1, 2),
        EdgeRecord::new(2, 2, 3),
        EdgeRecord::new(3, 3, 0),
    ];

    let mut graph = StreetGraph::new();
    graph.bulk_load(nodes, edges).unwrap();
    graph
}

/// Total composite cost along a node sequence, taking the cheapest
/// edge between each consecutive pair.
fn path_cost(graph: &StreetGraph, path: &[NodeId], weights: &Weights) -> f64 {
    path.windows(2)
        .map(|pair| {
            let from = graph.node(pair[0]).unwrap();
            let to = graph.node(pair[1]).unwrap();
            from.edges()
                .iter()
                .filter_map(|&id| {
                    let edge = graph.edge(id)?;
                    (edge.opposite(pair[0]) == Some(pair[1]))
                        .then(|| edge_cost(edge, from, to, weights))
                })
                .min_by(f64::total_cmp)
                .unwrap()
        })
        .sum()
}

#[test]
fn square_diagonal_is_two_edge_lengths() {
    let graph = square([0.0; 4]);
    let weights = Weights::new(1.0, 0.0, 0.0).unwrap();
    let edge_length = haversine(0.0, 0.0, 0.0, 0.001);

    let tree = dijkstra(&graph, 0, Some(2), &weights).unwrap();
    assert!((tree.distance(2) - 2.0 * edge_length).abs() < 1e-6);

    let path = a_star(&graph, 0, 2, &weights).unwrap().unwrap();
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&2));
    assert!((path_cost(&graph, &path, &weights) - tree.distance(2)).abs() < 1e-9);
}

#[test]
fn astar_matches_dijkstra_on_distance_only_weights() {
    let graph = square([0.3, 0.9, 0.2, 0.4]);
    let weights = Weights::new(1.0, 0.0, 0.0).unwrap();

    for goal in 1..4 {
        let tree = dijkstra(&graph, 0, Some(goal), &weights).unwrap();
        let path = a_star(&graph, 0, goal, &weights).unwrap().unwrap();
        assert!(
            (path_cost(&graph, &path, &weights) - tree.distance(goal)).abs() < 1e-9,
            "goal {goal}"
        );
    }
}

#[test]
fn safety_weighting_prefers_the_calm_detour() {
    // going 0 -> 2 via 1 passes a 0.9 hotspot; via 3 only 0.1
    let graph = square([0.0, 0.9, 0.0, 0.1]);
    let weights = Weights::new(0.0, 0.0, 1000.0).unwrap();

    let tree = dijkstra(&graph, 0, Some(2), &weights).unwrap();
    let path = reconstruct_path(&tree.predecessors, 0, 2);
    assert_eq!(path, vec![0, 3, 2]);
}

#[test]
fn reconstructed_route_spans_start_to_goal() {
    let graph = square([0.0; 4]);
    let weights = Weights::new(1.0, 0.0, 0.0).unwrap();
    let tree = dijkstra(&graph, 0, None, &weights).unwrap();

    for goal in 0..4 {
        let path = reconstruct_path(&tree.predecessors, 0, goal);
        assert_eq!(path.first(), Some(&0), "goal {goal}");
        assert_eq!(path.last(), Some(&goal), "goal {goal}");
    }
}

#[test]
fn self_route_has_zero_distance() {
    let graph = square([0.0; 4]);
    let weights = Weights::new(1.0, 1.0, 1.0).unwrap();

    for node in 0..4 {
        let tree = dijkstra(&graph, node, Some(node), &weights).unwrap();
        assert_eq!(tree.distance(node), 0.0);
    }
}

#[test]
fn unreachable_island_is_infinite_for_dijkstra_and_none_for_astar() {
    let mut graph = square([0.0; 4]);
    graph.add_node(99, 5.0, 5.0, 0.0, 0.0);
    let weights = Weights::new(1.0, 0.0, 0.0).unwrap();

    let tree = dijkstra(&graph, 0, Some(99), &weights).unwrap();
    assert!(tree.distance(99).is_infinite());
    assert_eq!(tree.predecessors[&99], None);

    assert_eq!(a_star(&graph, 0, 99, &weights).unwrap(), None);
}

#[test]
fn repeated_construction_leaves_the_graph_unchanged() {
    let mut graph = square([0.0; 4]);
    let (nodes_before, edges_before) = (graph.node_count(), graph.edge_count());

    graph.add_node(0, 9.0, 9.0, 9.0, 9.0);
    graph.add_edge(0, 0, 1, true, 42).unwrap();

    assert_eq!(graph.node_count(), nodes_before);
    assert_eq!(graph.edge_count(), edges_before);
    assert_eq!(graph.node(0).unwrap().lat(), 0.0);
    assert_eq!(graph.edge(0).unwrap().importance, 1);
}

#[test]
fn elevation_weight_penalizes_the_climb() {
    // same square, but corner 1 sits on a hill
    let mut graph = StreetGraph::new();
    let coords = [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)];
    let nodes = coords
        .iter()
        .enumerate()
        .map(|(id, &(lat, lon))| {
            let mut record = NodeRecord::new(id as NodeId, lat, lon);
            record.altitude_m = if id == 1 { 80.0 } else { 0.0 };
            record
        })
        .collect::<Vec<_>>();
    let edges = vec![
        EdgeRecord::new(0, 0, 1),
        EdgeRecord::new(1, 1, 2),
        EdgeRecord::new(2, 2, 3),
        EdgeRecord::new(3, 3, 0),
    ];
    graph.bulk_load(nodes, edges).unwrap();

    let weights = Weights::new(1.0, 10.0, 0.0).unwrap();
    let tree = dijkstra(&graph, 0, Some(2), &weights).unwrap();
    assert_eq!(reconstruct_path(&tree.predecessors, 0, 2), vec![0, 3, 2]);
}
