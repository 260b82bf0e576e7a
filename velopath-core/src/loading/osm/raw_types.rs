use hashbrown::HashMap;

use crate::NodeId;

/// Raw `<node>` element
#[derive(Debug, Clone, Default)]
pub struct OsmNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub tags: HashMap<String, String>,
}

/// Raw `<way>` element
#[derive(Debug, Clone, Default)]
pub struct OsmWay {
    pub id: i64,
    pub node_refs: Vec<NodeId>,
    pub tags: HashMap<String, String>,
}

/// Parsed OSM extract
#[derive(Debug, Clone, Default)]
pub struct OsmExtract {
    pub nodes: Vec<OsmNode>,
    pub ways: Vec<OsmWay>,
}
