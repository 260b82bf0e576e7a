//! Resolution of coordinates and free text to graph node ids
//!
//! Search itself only accepts node ids; everything here turns the
//! outside world's inputs (map clicks, street names, geocoded
//! addresses) into ids before a search starts.

pub mod directory;
pub mod index;

pub use directory::{NamedWay, StreetDirectory};
pub use index::{IndexedPoint, SpatialIndex};

/// How a free-text query should be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveQuery {
    /// `"street, street"` - resolved against the way directory
    Intersection(String, String),
    /// Anything else - handed to an external geocoder first, then
    /// snapped to the nearest node
    Address(String),
}

impl ResolveQuery {
    pub fn parse(text: &str) -> Self {
        match text.split_once(',') {
            Some((a, b)) => Self::Intersection(a.trim().to_string(), b.trim().to_string()),
            None => Self::Address(text.trim().to_string()),
        }
    }
}
