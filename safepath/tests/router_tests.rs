use approx::assert_relative_eq;
use safepath::app::{AppError, SafePathRouter};
use std::io::Write;
use std::path::PathBuf;

/// the medellín-shaped fixture network: two routes between the corners
/// (one short and riskier, one longer and safer) plus a disconnected
/// island and two malformed rows the loader must reject.
fn fixture_router() -> SafePathRouter {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("edges.csv");
    SafePathRouter::from_csv(fixture).unwrap()
}

const ORIGIN: (f64, f64) = (-75.5657, 6.2080);
const DEST: (f64, f64) = (-75.5676, 6.2528);

#[test]
fn test_dijkstra_combined_route() {
    let router = fixture_router();
    let result = router.route(ORIGIN, DEST, "combined", "dijkstra").unwrap();

    assert!(result.statistics.num_segments >= 1);
    assert!(result.cost.is_finite() && result.cost > 0.0);
    assert_eq!(result.algorithm, "dijkstra");
    assert_eq!(result.optimization, "combined");
    assert!(result.note.is_none());

    // the safer detour wins under the combined score
    assert_relative_eq!(result.cost, 0.75, epsilon = 1e-9);
    assert_eq!(result.statistics.num_segments, 3);
    assert_eq!(result.performance.nodes_in_path, result.path.len());
    assert!(result.performance.nodes_explored >= 1);
}

#[test]
fn test_astar_matches_dijkstra() {
    let router = fixture_router();
    for optimization in ["distance", "combined", "risk", "incidents"] {
        let dj = router.route(ORIGIN, DEST, optimization, "dijkstra").unwrap();
        let asr = router.route(ORIGIN, DEST, optimization, "astar").unwrap();
        assert_relative_eq!(dj.cost, asr.cost, epsilon = 1e-9);
        assert_relative_eq!(
            dj.statistics.total_distance,
            asr.statistics.total_distance,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_bellman_ford_matches_dijkstra() {
    let router = fixture_router();
    let dj = router.route(ORIGIN, DEST, "distance", "dijkstra").unwrap();
    let bf = router.route(ORIGIN, DEST, "distance", "bellman_ford").unwrap();
    assert_relative_eq!(dj.cost, bf.cost, epsilon = 1e-9);
    assert_relative_eq!(dj.cost, 5010.0, epsilon = 1e-9);
}

#[test]
fn test_greedy_never_beats_dijkstra() {
    let router = fixture_router();
    let dj = router.route(ORIGIN, DEST, "combined", "dijkstra").unwrap();
    let greedy = router.route(ORIGIN, DEST, "combined", "greedy").unwrap();
    assert_eq!(greedy.algorithm, "greedy");
    assert!(greedy.cost >= dj.cost - 1e-12);
}

#[test]
fn test_k_shortest_ranked_and_monotone() {
    let router = fixture_router();
    let routes = router.k_shortest(ORIGIN, DEST, 3, "combined").unwrap();

    // the fixture permits exactly two simple routes between the corners
    assert_eq!(routes.len(), 2);
    for (idx, route) in routes.iter().enumerate() {
        assert_eq!(route.rank, Some(idx + 1));
        assert_eq!(route.algorithm, "k_shortest");
    }
    assert!(routes[0].cost <= routes[1].cost);
    assert_ne!(routes[0].path, routes[1].path);
}

#[test]
fn test_route_with_k_shortest_label_returns_rank_one() {
    let router = fixture_router();
    let single = router.route(ORIGIN, DEST, "combined", "k_shortest").unwrap();
    let ranked = router.k_shortest(ORIGIN, DEST, 3, "combined").unwrap();
    assert_eq!(single.rank, Some(1));
    assert_relative_eq!(single.cost, ranked[0].cost, epsilon = 1e-9);
}

#[test]
fn test_disconnected_components_yield_no_path() {
    let router = fixture_router();
    // the island edge sits at (-75.60, 6.30), unreachable from the grid
    let result = router.route((-75.6000, 6.3000), DEST, "combined", "dijkstra");
    assert!(matches!(result, Err(AppError::NoPath)));
}

#[test]
fn test_unknown_optimization_and_algorithm() {
    let router = fixture_router();
    assert!(matches!(
        router.route(ORIGIN, DEST, "speed", "dijkstra"),
        Err(AppError::UnknownOptimization(_))
    ));
    assert!(matches!(
        router.route(ORIGIN, DEST, "combined", "quantum"),
        Err(AppError::UnknownAlgorithm(_))
    ));
}

#[test]
fn test_spanish_incident_alias() {
    let router = fixture_router();
    let result = router.route(ORIGIN, DEST, "incidentes", "dijkstra").unwrap();
    assert_eq!(result.optimization, "incidents");
}

#[test]
fn test_snapping_tolerates_offset_coordinates() {
    let router = fixture_router();
    // a few meters away from the true corner vertices
    let result = router
        .route(
            (-75.56572, 6.20803),
            (-75.56757, 6.25277),
            "distance",
            "dijkstra",
        )
        .unwrap();
    assert_relative_eq!(result.cost, 5010.0, epsilon = 1e-9);
}

#[test]
fn test_geojson_document_shape() {
    let router = fixture_router();
    let result = router.route(ORIGIN, DEST, "combined", "dijkstra").unwrap();
    let document = router.route_geojson(&result).unwrap();

    assert_eq!(document["type"], "FeatureCollection");
    let features = document["features"].as_array().unwrap();
    assert_eq!(features.len(), result.statistics.num_segments);

    let properties = &features[0]["properties"];
    for key in [
        "name",
        "length",
        "harassmentRisk",
        "cameras_count",
        "incidents_count",
        "risk_score",
        "optimization",
        "algorithm",
    ] {
        assert!(
            !properties[key].is_null(),
            "feature property '{}' missing",
            key
        );
    }
    assert_eq!(features[0]["geometry"]["type"], "LineString");

    let top = &document["properties"];
    assert_eq!(top["optimization"], "combined");
    assert_eq!(top["algorithm"], "dijkstra");
    assert!(top["cost"].as_f64().unwrap() > 0.0);
    assert_eq!(
        top["statistics"]["num_segments"].as_u64().unwrap(),
        result.statistics.num_segments as u64
    );
}

#[test]
fn test_identical_queries_serialize_identically() {
    let router = fixture_router();
    let first = router.route(ORIGIN, DEST, "combined", "dijkstra").unwrap();
    let second = router.route(ORIGIN, DEST, "combined", "dijkstra").unwrap();

    let first_doc = serde_json::to_string(&router.route_geojson(&first).unwrap()).unwrap();
    let second_doc = serde_json::to_string(&router.route_geojson(&second).unwrap()).unwrap();
    assert_eq!(first_doc, second_doc);
}

#[test]
fn test_compare_pairs_labels_with_outcomes() {
    let router = fixture_router();
    let outcomes = router.compare(
        ORIGIN,
        DEST,
        "combined",
        &["dijkstra", "astar", "quantum"],
    );
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].1.is_ok());
    assert!(outcomes[1].1.is_ok());
    assert!(matches!(outcomes[2].1, Err(AppError::UnknownAlgorithm(_))));
}

/// a single chain of more vertices than the depth bound of the bounded
/// searches admits, so backtracking fails and the facade must rescue the
/// query with Dijkstra while preserving the requested label.
#[test]
fn test_bounded_search_falls_back_to_dijkstra() {
    let n = 120;
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("chain.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(
        file,
        "origin,destination,name,length,oneway,geometry,harassmentRisk,cameras_count,incidents_count,incidents_severity,risk_score,combined_cost"
    )
    .unwrap();
    for i in 0..n - 1 {
        let (x1, y1) = (-75.57, 6.20 + i as f64 * 1e-4);
        let (x2, y2) = (-75.57, 6.20 + (i + 1) as f64 * 1e-4);
        writeln!(
            file,
            "\"({x1}, {y1})\",\"({x2}, {y2})\",Chain {i},50.0,True,\"LINESTRING ({x1} {y1}, {x2} {y2})\",0.1,0,0,0.0,0.1,0.1"
        )
        .unwrap();
    }
    drop(file);

    let router = SafePathRouter::from_csv(&csv_path).unwrap();
    let origin = (-75.57, 6.20);
    let dest = (-75.57, 6.20 + (n - 1) as f64 * 1e-4);

    let result = router.route(origin, dest, "combined", "backtracking").unwrap();
    assert_eq!(result.algorithm, "backtracking");
    assert_eq!(result.note.as_deref(), Some("fallback: Dijkstra"));
    assert_eq!(result.statistics.num_segments, n - 1);
}
