//! small synthetic street networks shared by the search algorithm tests.

use crate::model::map::GeometryModel;
use crate::model::network::{Edge, EdgeId, Graph, GraphBuilder};
use geo::{coord, LineString, Rect};

/// builds a graph and aligned geometry table from a vertex coordinate list
/// and `(src, dst, length_m, risk)` edge specs. `combined_cost` mirrors the
/// risk score and all incident counts are zero, which keeps the incident
/// optimization in its all-zero tie-breaking regime.
pub(crate) fn build(
    vertices: &[(f64, f64)],
    edges: &[(usize, usize, f64, f64)],
) -> (Graph, GeometryModel) {
    let mut builder = GraphBuilder::new();
    let ids: Vec<_> = vertices
        .iter()
        .map(|(x, y)| builder.intern_vertex(coord! {x: *x, y: *y}))
        .collect();

    let mut geometries: Vec<LineString<f64>> = vec![];
    let mut bboxes: Vec<Rect<f64>> = vec![];
    for (src, dst, length_m, risk) in edges {
        builder.upsert_edge(Edge {
            edge_id: EdgeId::default(),
            src_vertex_id: ids[*src],
            dst_vertex_id: ids[*dst],
            name: None,
            length_m: *length_m,
            oneway: false,
            harassment_risk: *risk,
            cameras_count: 1,
            incidents_count: 0,
            incidents_severity: 0.0,
            risk_score: *risk,
            combined_cost: *risk,
        });
        let src_coord = coord! {x: vertices[*src].0, y: vertices[*src].1};
        let dst_coord = coord! {x: vertices[*dst].0, y: vertices[*dst].1};
        geometries.push(LineString::from(vec![src_coord, dst_coord]));
        bboxes.push(Rect::new(src_coord, dst_coord));
    }

    (builder.finalize(), GeometryModel::new(geometries, bboxes))
}

/// the stretched box world:
///
/// ```text
/// (0) <---> (1)      0 -[10000]- 1
///  ^         ^       1 -[2000]-- 2
///  |         |       2 -[1200]-- 3
///  v         v       3 -[2000]-- 0
/// (3) <---> (2)
/// ```
///
/// the direct 0->1 edge is stretched to 10000 m, so the optimal route from
/// 0 to 1 runs the long way around (cost 5200). every edge length exceeds
/// the straight-line distance between its endpoints, keeping the distance
/// heuristic admissible.
pub(crate) fn box_world() -> (Graph, GeometryModel) {
    let vertices = [(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0)];
    let edges = [
        (0, 1, 10_000.0, 0.5),
        (1, 0, 10_000.0, 0.5),
        (1, 2, 2_000.0, 0.1),
        (2, 1, 2_000.0, 0.1),
        (2, 3, 1_200.0, 0.06),
        (3, 2, 1_200.0, 0.06),
        (3, 0, 2_000.0, 0.1),
        (0, 3, 2_000.0, 0.1),
    ];
    build(&vertices, &edges)
}

/// box world plus a two-vertex island (ids 4 and 5) with no connection to
/// the box; routing between the components must fail.
pub(crate) fn disconnected_world() -> (Graph, GeometryModel) {
    let vertices = [
        (0.0, 0.0),
        (0.0, 0.01),
        (0.01, 0.01),
        (0.01, 0.0),
        (1.0, 1.0),
        (1.0, 1.01),
    ];
    let edges = [
        (0, 1, 10_000.0, 0.5),
        (1, 0, 10_000.0, 0.5),
        (1, 2, 2_000.0, 0.1),
        (2, 1, 2_000.0, 0.1),
        (2, 3, 1_200.0, 0.06),
        (3, 2, 1_200.0, 0.06),
        (3, 0, 2_000.0, 0.1),
        (0, 3, 2_000.0, 0.1),
        (4, 5, 1_200.0, 0.1),
        (5, 4, 1_200.0, 0.1),
    ];
    build(&vertices, &edges)
}

/// a world with a low-risk lure: from 0, the edge toward vertex 1 looks
/// attractive to a greedy scorer (cheap edge, close to the goal) but leads
/// into a high-risk continuation. the optimal risk route goes 0 -> 2 -> 3.
///
/// vertex 3 is the goal; greedy lands on cost 0.91 where Dijkstra finds 0.4.
pub(crate) fn lure_world() -> (Graph, GeometryModel) {
    let vertices = [(0.0, 0.0), (0.019, 0.0), (0.0, 0.01), (0.02, 0.0)];
    let edges = [
        (0, 1, 2_200.0, 0.01),
        (1, 3, 150.0, 0.9),
        (0, 2, 1_200.0, 0.3),
        (2, 3, 2_600.0, 0.1),
    ];
    build(&vertices, &edges)
}

/// the lure world plus a direct 0 -> 3 edge, giving exactly three simple
/// paths from 0 to 3 with distinct distances: 2350, 3800, and 4000 meters.
pub(crate) fn yen_world() -> (Graph, GeometryModel) {
    let vertices = [(0.0, 0.0), (0.019, 0.0), (0.0, 0.01), (0.02, 0.0)];
    let edges = [
        (0, 1, 2_200.0, 0.01),
        (1, 3, 150.0, 0.9),
        (0, 2, 1_200.0, 0.3),
        (2, 3, 2_600.0, 0.1),
        (0, 3, 4_000.0, 0.5),
    ];
    build(&vertices, &edges)
}
