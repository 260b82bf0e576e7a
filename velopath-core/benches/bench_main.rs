use criterion::{Criterion, criterion_group, criterion_main};

use velopath_core::NodeId;
use velopath_core::model::{EdgeRecord, NodeRecord, StreetGraph};
use velopath_core::routing::{Weights, a_star, dijkstra};

const SIDE: i64 = 50;

/// Square lattice of SIDE x SIDE nodes spaced ~111 m apart
fn grid_graph() -> StreetGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut segment = 0;

    for row in 0..SIDE {
        for col in 0..SIDE {
            let id = row * SIDE + col;
            let mut record = NodeRecord::new(id, row as f64 * 0.001, col as f64 * 0.001);
            record.accident_prob = ((id % 10) as f64) / 10.0;
            nodes.push(record);

            if col + 1 < SIDE {
                edges.push(EdgeRecord::new(segment, id, id + 1));
                segment += 1;
            }
            if row + 1 < SIDE {
                edges.push(EdgeRecord::new(segment, id, id + SIDE));
                segment += 1;
            }
        }
    }

    let mut graph = StreetGraph::new();
    graph.bulk_load(nodes, edges).unwrap();
    graph
}

fn bench_searches(c: &mut Criterion) {
    let graph = grid_graph();
    let weights = Weights::new(1.0, 0.0, 1000.0).unwrap();
    let start: NodeId = 0;
    let goal: NodeId = SIDE * SIDE - 1;

    c.bench_function("dijkstra_grid_full", |b| {
        b.iter(|| dijkstra(&graph, start, None, &weights).unwrap())
    });

    c.bench_function("dijkstra_grid_goal", |b| {
        b.iter(|| dijkstra(&graph, start, Some(goal), &weights).unwrap())
    });

    c.bench_function("astar_grid_corner_to_corner", |b| {
        b.iter(|| a_star(&graph, start, goal, &weights).unwrap())
    });
}

criterion_group!(benches, bench_searches);
criterion_main!(benches);
