//! Turns a raw OSM extract into graph and directory records

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;

use super::raw_types::{OsmExtract, OsmNode, OsmWay};
use crate::model::{EdgeRecord, NodeRecord};
use crate::resolve::NamedWay;
use crate::routing::haversine;
use crate::NodeId;

/// Importance grows with segment length: one point per 100 m, at
/// least 1.
fn importance_for(length_m: f64) -> i32 {
    (length_m / 100.0) as i32 + 1
}

fn is_routable(way: &OsmWay) -> bool {
    way.tags.contains_key("highway")
}

/// Dedicated cycling infrastructure per common OSM tagging
fn has_bike_lane(way: &OsmWay) -> bool {
    way.tags.get("highway").is_some_and(|v| v == "cycleway")
        || way
            .tags
            .keys()
            .any(|k| k == "cycleway" || k.starts_with("cycleway:"))
        || way.tags.get("bicycle").is_some_and(|v| v == "designated")
}

/// Builds node and physical-segment records for every routable way,
/// plus the named-way list used for text resolution. Nodes that no
/// kept way touches are dropped; segments referencing nodes outside
/// the extract are skipped.
pub(crate) fn build_records(
    extract: &OsmExtract,
) -> (Vec<NodeRecord>, Vec<EdgeRecord>, Vec<NamedWay>) {
    let by_id: HashMap<NodeId, &OsmNode> = extract.nodes.iter().map(|n| (n.id, n)).collect();

    let mut used: HashSet<NodeId> = HashSet::new();
    let mut edges = Vec::new();
    let mut segment_id: i64 = 0;

    for way in extract.ways.iter().filter(|way| is_routable(way)) {
        let bike_lane = has_bike_lane(way);
        for (&a, &b) in way.node_refs.iter().tuple_windows() {
            let (Some(node_a), Some(node_b)) = (by_id.get(&a), by_id.get(&b)) else {
                continue;
            };
            let length = haversine(node_a.lat, node_a.lon, node_b.lat, node_b.lon);
            edges.push(EdgeRecord {
                id: segment_id,
                endpoint_a: a,
                endpoint_b: b,
                bike_lane,
                importance: importance_for(length),
            });
            segment_id += 1;
            used.insert(a);
            used.insert(b);
        }
    }

    let nodes = extract
        .nodes
        .iter()
        .filter(|node| used.contains(&node.id))
        .map(|node| NodeRecord {
            id: node.id,
            lat: node.lat,
            lon: node.lon,
            altitude_m: node
                .tags
                .get("ele")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            accident_prob: 0.0,
            tags: node.tags.clone(),
        })
        .collect();

    let named_ways = extract
        .ways
        .iter()
        .filter_map(|way| {
            let name = way.tags.get("name")?;
            Some(NamedWay {
                name: name.clone(),
                nodes: way.node_refs.clone(),
            })
        })
        .collect();

    (nodes, edges, named_ways)
}
