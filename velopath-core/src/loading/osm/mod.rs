//! OSM XML processing

mod parser;
mod processor;
mod raw_types;

pub(crate) use parser::parse_osm_file;
pub(crate) use processor::build_records;
pub use raw_types::{OsmExtract, OsmNode, OsmWay};
