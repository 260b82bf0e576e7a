//! Shortest-path search over the street graph

pub mod astar;
pub mod cost;
pub mod dijkstra;
pub mod path;
mod state;

pub use astar::a_star;
pub use cost::{Weights, edge_cost, haversine};
pub use dijkstra::{ShortestPathTree, dijkstra};
pub use path::reconstruct_path;
