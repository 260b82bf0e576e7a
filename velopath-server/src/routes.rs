//! HTTP API of the route service

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use velopath_core::NodeId;
use velopath_core::model::StreetGraph;
use velopath_core::resolve::ResolveQuery;
use velopath_core::routing::{a_star, dijkstra, reconstruct_path};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search_node", get(search_node))
        .route("/click_node", get(click_node))
        .route("/calculate_route", get(calculate_route))
        .route("/safety_scores", post(safety_scores))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(ConcurrencyLimitLayer::new(256))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct NodeResponse {
    node_id: NodeId,
    lat: f64,
    lon: f64,
}

fn node_response(graph: &StreetGraph, node_id: NodeId) -> Result<Json<NodeResponse>, ApiError> {
    let node = graph
        .node(node_id)
        .ok_or_else(|| ApiError::not_found(format!("node {node_id} is not in the graph")))?;
    Ok(Json(NodeResponse {
        node_id,
        lat: node.lat(),
        lon: node.lon(),
    }))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

/// Text to node: `"a, b"` resolves as a street intersection against
/// the loaded ways, anything else goes through the external geocoder
/// and snaps to the nearest node.
async fn search_node(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<NodeResponse>, ApiError> {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return Err(ApiError::bad_request("query parameter required"));
    };

    let resolved = match ResolveQuery::parse(&query) {
        ResolveQuery::Intersection(street_a, street_b) => {
            let model = state.model.read().await;
            model.find_intersection(&street_a, &street_b)
        }
        ResolveQuery::Address(text) => match state.geocoder.forward(&text).await {
            Some(point) => {
                let model = state.model.read().await;
                model.nearest_node(point.y(), point.x())
            }
            None => None,
        },
    };

    let Some(node_id) = resolved else {
        return Err(ApiError::not_found(format!("no node found for '{query}'")));
    };

    let model = state.model.read().await;
    node_response(&model.graph, node_id)
}

#[derive(Debug, Deserialize)]
struct ClickParams {
    lat: Option<String>,
    lon: Option<String>,
}

/// Map click to node: nearest graph node within the snap radius
async fn click_node(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClickParams>,
) -> Result<Json<NodeResponse>, ApiError> {
    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return Err(ApiError::bad_request("lat and lon parameters required"));
    };
    let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
        return Err(ApiError::bad_request("lat and lon must be numeric"));
    };

    let model = state.model.read().await;
    let node_id = model
        .nearest_node(lat, lon)
        .ok_or(velopath_core::Error::NoPointsFound)?;
    node_response(&model.graph, node_id)
}

#[derive(Debug, Deserialize)]
struct RouteParams {
    origin: Option<String>,
    destination: Option<String>,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    dijkstra_ids: Vec<NodeId>,
    /// `[lat, lon]` pairs for direct rendering
    dijkstra_coords: Vec<[f64; 2]>,
    astar_ids: Vec<NodeId>,
    astar_coords: Vec<[f64; 2]>,
}

fn parse_node_id(raw: Option<String>, name: &str) -> Result<NodeId, ApiError> {
    raw.ok_or_else(|| ApiError::bad_request(format!("{name} parameter required")))?
        .parse()
        .map_err(|_| ApiError::bad_request(format!("{name} must be an integer node id")))
}

fn coords_for(graph: &StreetGraph, ids: &[NodeId]) -> Vec<[f64; 2]> {
    ids.iter()
        .filter_map(|&id| graph.node(id))
        .map(|node| [node.lat(), node.lon()])
        .collect()
}

/// Runs Dijkstra and A* between two resolved node ids with the
/// configured weights and returns both routes for comparison.
async fn calculate_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<Json<RouteResponse>, ApiError> {
    let origin = parse_node_id(params.origin, "origin")?;
    let destination = parse_node_id(params.destination, "destination")?;

    let model = state.model.read().await;
    let graph = &model.graph;
    if !graph.contains_node(origin) || !graph.contains_node(destination) {
        return Err(ApiError::not_found(
            "origin or destination is not in the graph",
        ));
    }

    let tree = dijkstra(graph, origin, Some(destination), &state.weights)?;
    let dijkstra_ids = if tree.predecessors.get(&destination).copied().flatten().is_some() {
        reconstruct_path(&tree.predecessors, origin, destination)
    } else {
        Vec::new()
    };

    let astar_ids = a_star(graph, origin, destination, &state.weights)?.unwrap_or_default();

    let response = RouteResponse {
        dijkstra_coords: coords_for(graph, &dijkstra_ids),
        astar_coords: coords_for(graph, &astar_ids),
        dijkstra_ids,
        astar_ids,
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct SafetyScoresRequest {
    /// Node tag the group labels are matched against, e.g. `comuna`
    attribute: String,
    scores: std::collections::HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
struct SafetyScoresResponse {
    updated: usize,
}

/// Batch-overwrites node accident probabilities from per-group scores
async fn safety_scores(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SafetyScoresRequest>,
) -> Result<Json<SafetyScoresResponse>, ApiError> {
    if request.attribute.trim().is_empty() {
        return Err(ApiError::bad_request("attribute name required"));
    }

    let mut model = state.model.write().await;
    let updated = model.graph.assign_safety_scores(
        request.scores.iter().map(|(group, &score)| (group.as_str(), score)),
        &request.attribute,
    );
    info!("safety scores applied, {updated} nodes updated");
    Ok(Json(SafetyScoresResponse { updated }))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tokio::sync::RwLock;
    use tower::util::ServiceExt;

    use velopath_core::model::{EdgeRecord, NodeRecord, StreetModel};
    use velopath_core::resolve::{NamedWay, SpatialIndex, StreetDirectory};
    use velopath_core::routing::Weights;

    use super::*;
    use crate::config::GeocoderConfig;
    use crate::geocoder::Geocoder;

    /// ~111 m square with two named streets crossing at node 1
    fn square_model() -> StreetModel {
        let coords = [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)];
        let nodes = coords
            .iter()
            .enumerate()
            .map(|(id, &(lat, lon))| {
                let mut record = NodeRecord::new(id as NodeId, lat, lon);
                record.tags.insert("comuna".to_string(), "Renca".to_string());
                record
            })
            .collect::<Vec<_>>();
        let edges = vec![
            EdgeRecord::new(0, 0, 1),
            EdgeRecord::new(1, 1, 2),
            EdgeRecord::new(2, 2, 3),
            EdgeRecord::new(3, 3, 0),
        ];

        let mut graph = StreetGraph::new();
        graph.bulk_load(nodes, edges).unwrap();
        let spatial_index = SpatialIndex::build(&graph);
        let streets = StreetDirectory::new(vec![
            NamedWay {
                name: "Gorbea".to_string(),
                nodes: vec![0, 1],
            },
            NamedWay {
                name: "Vergara".to_string(),
                nodes: vec![1, 2],
            },
        ]);
        StreetModel::new(graph, spatial_index, streets)
    }

    fn test_router() -> Router {
        let state = Arc::new(AppState {
            model: RwLock::new(square_model()),
            weights: Weights::new(1.0, 0.0, 0.0).unwrap(),
            geocoder: Geocoder::new(&GeocoderConfig::default()).unwrap(),
        });
        router(state)
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn calculate_route_returns_both_algorithms() {
        let (status, body) = get_json("/calculate_route?origin=0&destination=2").await;

        assert_eq!(status, StatusCode::OK);
        let dijkstra_ids = body["dijkstra_ids"].as_array().unwrap();
        let astar_ids = body["astar_ids"].as_array().unwrap();
        assert_eq!(dijkstra_ids.first().unwrap(), 0);
        assert_eq!(dijkstra_ids.last().unwrap(), 2);
        assert_eq!(astar_ids.first().unwrap(), 0);
        assert_eq!(astar_ids.last().unwrap(), 2);
        assert_eq!(
            body["dijkstra_coords"].as_array().unwrap().len(),
            dijkstra_ids.len()
        );
    }

    #[tokio::test]
    async fn calculate_route_rejects_unknown_nodes() {
        let (status, body) = get_json("/calculate_route?origin=0&destination=404").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn calculate_route_rejects_malformed_ids() {
        let (status, _) = get_json("/calculate_route?origin=zero&destination=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn click_node_snaps_to_nearest() {
        let (status, body) = get_json("/click_node?lat=0.0001&lon=0.0001").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["node_id"], 0);
    }

    #[tokio::test]
    async fn click_node_rejects_non_numeric_coordinates() {
        let (status, _) = get_json("/click_node?lat=north&lon=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn click_node_far_away_is_not_found() {
        let (status, _) = get_json("/click_node?lat=5&lon=5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_node_resolves_intersections() {
        let (status, body) = get_json("/search_node?query=Gorbea,%20Vergara").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["node_id"], 1);
    }

    #[tokio::test]
    async fn search_node_requires_a_query() {
        let (status, _) = get_json("/search_node").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn safety_scores_update_matching_nodes() {
        let request = Request::builder()
            .method("POST")
            .uri("/safety_scores")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"attribute":"comuna","scores":{"renca":0.7}}"#,
            ))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["updated"], 4);
    }
}
