//! Shared application state

use tokio::sync::RwLock;

use velopath_core::model::StreetModel;
use velopath_core::routing::Weights;

use crate::geocoder::Geocoder;

/// Everything handlers need. The model sits behind a read/write lock:
/// searches take the read half, safety-score assignment the write
/// half, which serializes mutation against in-flight searches.
pub struct AppState {
    pub model: RwLock<StreetModel>,
    pub weights: Weights,
    pub geocoder: Geocoder,
}
