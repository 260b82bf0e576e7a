//! Composite edge-cost function and the haversine metric under it

use crate::Error;
use crate::model::{StreetEdge, StreetNode};

/// Fixed Earth radius in meters used by the distance contract.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Weight configuration for the composite edge cost.
///
/// There is deliberately no `Default`: the engine imposes none, calling
/// services supply their weights explicitly (the HTTP service documents
/// `(1.0, 0.0, 1000.0)` in its configuration).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Applied to meters of great-circle distance
    pub distance: f64,
    /// Applied to meters of positive elevation gain
    pub elevation: f64,
    /// Applied to the destination accident probability, attenuated by
    /// edge importance
    pub safety: f64,
}

impl Weights {
    /// Builds a weight configuration.
    ///
    /// # Errors
    ///
    /// Rejects negative components: Dijkstra and A* are only correct
    /// over non-negative edge costs.
    pub fn new(distance: f64, elevation: f64, safety: f64) -> Result<Self, Error> {
        if distance < 0.0 || elevation < 0.0 || safety < 0.0 {
            return Err(Error::InvalidData(format!(
                "cost weights must be non-negative, got ({distance}, {elevation}, {safety})"
            )));
        }
        Ok(Self {
            distance,
            elevation,
            safety,
        })
    }
}

/// Great-circle distance in meters between two lat/lon points,
/// half-angle haversine formula. Symmetric, zero on equal points.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// Cost of traversing `edge` from `from` to `to`, where `to` is the
/// endpoint opposite `from`.
///
/// Distance, climb, and the safety penalty are each non-negative, so
/// the total is non-negative for non-negative weights. The cost is
/// directional: the same edge traversed the other way charges a
/// different climb and a different destination safety term, which is
/// why the direction comes from the caller and not from the edge's
/// stored endpoint order.
pub fn edge_cost(edge: &StreetEdge, from: &StreetNode, to: &StreetNode, weights: &Weights) -> f64 {
    let distance = haversine(from.lat(), from.lon(), to.lat(), to.lon());
    // descent is free
    let climb = (to.altitude_m - from.altitude_m).max(0.0);
    let safety = to.accident_prob / f64::from(edge.importance.max(1));

    weights.distance * distance + weights.elevation * climb + weights.safety * safety
}
