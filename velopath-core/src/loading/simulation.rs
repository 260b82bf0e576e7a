//! Synthetic altitude and accident-probability attributes
//!
//! City extracts rarely carry elevation and OSM has no accident data
//! at all, yet both cost components need values to stay exercised.
//! Until a safety-score submission overwrites them, every node gets a
//! simulated baseline derived from a seeded generator, so the same
//! extract always loads into the same model.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::NodeRecord;

pub(crate) fn simulate_attributes(records: &mut [NodeRecord], seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);

    for record in records.iter_mut() {
        // Surveyed elevation wins over the synthetic gradient
        if !record.tags.contains_key("ele") {
            record.altitude_m = 400.0 - 100.0 * record.lat + rng.random_range(0.0..50.0);
        }
        record.accident_prob = rng.random_range(0.1..0.9);
    }

    debug!("Simulated attributes for {} nodes", records.len());
}
