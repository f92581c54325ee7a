use crate::app::{
    empty_feature_collection, AppError, RouteStatistics, SafePathRouter,
};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// builds the HTTP application: `/health`, `/route`, and `/compare` over a
/// shared router instance, with a permissive CORS layer for the map
/// frontends.
pub fn app(router: Arc<SafePathRouter>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(route_handler))
        .route("/compare", get(compare_handler))
        .layer(CorsLayer::permissive())
        .with_state(router)
}

/// binds the listener and serves until the process is stopped.
pub async fn serve(router: Arc<SafePathRouter>, addr: SocketAddr) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("SafePath API listening on {}", addr);
    axum::serve(listener, app(router)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

fn default_optimization() -> String {
    String::from("combined")
}

fn default_algorithm() -> String {
    String::from("dijkstra")
}

fn default_compare_algorithms() -> String {
    String::from("dijkstra,astar,bellman_ford")
}

#[derive(Debug, Deserialize)]
struct RouteParams {
    origin_lon: f64,
    origin_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
    #[serde(default = "default_optimization")]
    optimization: String,
    #[serde(default = "default_algorithm")]
    algorithm: String,
}

/// `/route`: a GeoJSON FeatureCollection for the computed route. every
/// data-driven failure (no path, unknown optimization or algorithm)
/// degrades to the empty FeatureCollection rather than an error status.
async fn route_handler(
    State(router): State<Arc<SafePathRouter>>,
    Query(params): Query<RouteParams>,
) -> Json<Value> {
    let outcome = router
        .route(
            (params.origin_lon, params.origin_lat),
            (params.dest_lon, params.dest_lat),
            &params.optimization,
            &params.algorithm,
        )
        .and_then(|result| router.route_geojson(&result));
    match outcome {
        Ok(document) => Json(document),
        Err(e) => {
            log::warn!("route query degraded to an empty result: {}", e);
            Json(empty_feature_collection())
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    origin_lon: f64,
    origin_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
    #[serde(default = "default_optimization")]
    optimization: String,
    /// comma-separated algorithm labels
    #[serde(default = "default_compare_algorithms")]
    algorithms: String,
}

/// `/compare`: one entry per requested algorithm. a failing algorithm has
/// already been replaced by its Dijkstra fallback inside the facade where
/// possible; entries that still fail render with empty features.
async fn compare_handler(
    State(router): State<Arc<SafePathRouter>>,
    Query(params): Query<CompareParams>,
) -> Json<Value> {
    let requested: Vec<&str> = params
        .algorithms
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let outcomes = router.compare(
        (params.origin_lon, params.origin_lat),
        (params.dest_lon, params.dest_lat),
        &params.optimization,
        &requested,
    );

    let routes: Vec<Value> = outcomes
        .into_iter()
        .map(|(algorithm, outcome)| match outcome {
            Ok(result) => {
                let features = match router.route_features(&result) {
                    Ok(features) => serde_json::to_value(features).unwrap_or_else(|_| json!([])),
                    Err(e) => {
                        log::warn!("feature marshaling failed for {}: {}", algorithm, e);
                        json!([])
                    }
                };
                json!({
                    "algorithm": algorithm,
                    "features": features,
                    "statistics": result.statistics,
                    "cost": result.cost,
                    "note": result.note,
                })
            }
            Err(e) => {
                log::warn!("comparison entry {} degraded to empty: {}", algorithm, e);
                json!({
                    "algorithm": algorithm,
                    "features": [],
                    "statistics": RouteStatistics::default(),
                    "cost": 0.0,
                    "note": Value::Null,
                })
            }
        })
        .collect();

    Json(json!({
        "type": "Comparison",
        "optimization": params.optimization,
        "routes": routes,
    }))
}
