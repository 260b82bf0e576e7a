//! Forward geocoding against a photon-compatible service

use std::time::Duration;

use geo::Point;
use serde::Deserialize;
use tracing::warn;

use crate::config::GeocoderConfig;

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
    region_suffix: String,
}

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    geometry: PhotonGeometry,
}

#[derive(Debug, Deserialize)]
struct PhotonGeometry {
    /// lon, lat - GeoJSON coordinate order
    coordinates: [f64; 2],
}

impl Geocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("velopath/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            region_suffix: config.region_suffix.clone(),
        })
    }

    /// Resolves a free-form address to a coordinate. `None` covers
    /// both "no match" and a failed request - the caller answers 404
    /// either way, so there is nothing to retry here.
    pub async fn forward(&self, query: &str) -> Option<Point<f64>> {
        let full_query = if self.region_suffix.is_empty() {
            query.to_string()
        } else {
            format!("{query}, {}", self.region_suffix)
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", full_query.as_str()), ("limit", "1")])
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!("geocoder request failed: {err}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("geocoder answered {}", response.status());
            return None;
        }

        let body: PhotonResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!("geocoder response unreadable: {err}");
                return None;
            }
        };

        let [lon, lat] = body.features.first()?.geometry.coordinates;
        Some(Point::new(lon, lat))
    }
}
