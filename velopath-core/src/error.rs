use thiserror::Error;

use crate::{EdgeId, NodeId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("Edge {edge} references node {node} absent from the graph")]
    MissingEndpoint { edge: EdgeId, node: NodeId },
    #[error("No nearby nodes found for snapping")]
    NoPointsFound,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Malformed OSM XML: {0}")]
    XmlError(#[from] quick_xml::Error),
}
