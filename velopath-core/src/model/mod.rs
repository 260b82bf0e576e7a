//! Data model for the street routing graph

pub mod components;
pub mod graph;
pub mod street_model;

pub use components::{StreetEdge, StreetNode};
pub use graph::{EdgeRecord, NodeRecord, StreetGraph};
pub use street_model::StreetModel;
