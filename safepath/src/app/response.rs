use super::AppError;
use safepath_core::model::map::MapModel;
use safepath_core::model::network::{EdgeId, Graph, VertexId};
use serde::Serialize;
use wkt::ToWkt;

/// replaces NaN with 0.0. part of the service contract: no NaN may appear
/// in any serialized response.
pub fn sanitize_float(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// aggregate metrics over the edges of one route.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct RouteStatistics {
    pub total_distance: f64,
    pub avg_risk: f64,
    pub total_cameras: u32,
    pub total_incidents: u32,
    pub num_segments: usize,
}

/// one traversed edge of a route, in traversal order, with its geometry as
/// WKT. all floats are sanitized at construction, so serializing any part
/// of the record upholds the boundary contract.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EdgeDetail {
    #[serde(skip)]
    pub edge_id: EdgeId,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub name: String,
    pub length: f64,
    #[serde(rename = "harassmentRisk")]
    pub harassment_risk: f64,
    pub cameras_count: u32,
    pub incidents_count: u32,
    pub risk_score: f64,
    pub geometry: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Performance {
    pub execution_time_ms: f64,
    pub nodes_explored: usize,
    pub nodes_in_path: usize,
}

/// the uniform result record returned by the query facade for every
/// algorithm.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RouteResult {
    pub path: Vec<(f64, f64)>,
    pub cost: f64,
    pub optimization: String,
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub statistics: RouteStatistics,
    pub edges: Vec<EdgeDetail>,
    pub performance: Performance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// walks consecutive path pairs and sums the per-edge metrics.
/// `avg_risk` is the summed risk score over the number of segments, zero
/// for an empty or single-vertex path.
pub fn collect_route_stats(graph: &Graph, path: &[VertexId]) -> Result<RouteStatistics, AppError> {
    let mut total_distance = 0.0;
    let mut total_risk = 0.0;
    let mut total_cameras: u32 = 0;
    let mut total_incidents: u32 = 0;
    let mut num_segments: usize = 0;

    for pair in path.windows(2) {
        let edge_id = route_edge_id(graph, &pair[0], &pair[1])?;
        let edge = graph.get_edge(&edge_id)?;
        total_distance += edge.length_m;
        total_risk += edge.risk_score;
        total_cameras += edge.cameras_count;
        total_incidents += edge.incidents_count;
        num_segments += 1;
    }

    let avg_risk = if num_segments > 0 {
        total_risk / num_segments as f64
    } else {
        0.0
    };

    Ok(RouteStatistics {
        total_distance: sanitize_float(total_distance),
        avg_risk: sanitize_float(avg_risk),
        total_cameras,
        total_incidents,
        num_segments,
    })
}

/// the ordered edge-detail list for a route, with WKT geometry strings.
pub fn collect_edge_details(
    graph: &Graph,
    map_model: &MapModel,
    path: &[VertexId],
) -> Result<Vec<EdgeDetail>, AppError> {
    let mut details = Vec::with_capacity(path.len().saturating_sub(1));
    for pair in path.windows(2) {
        let edge_id = route_edge_id(graph, &pair[0], &pair[1])?;
        let edge = graph.get_edge(&edge_id)?;
        let from = graph.get_vertex(&pair[0])?.to_tuple_underlying();
        let to = graph.get_vertex(&pair[1])?.to_tuple_underlying();
        let geometry = map_model.get(&edge_id)?.wkt_string();
        details.push(EdgeDetail {
            edge_id,
            from,
            to,
            name: edge.name.clone().unwrap_or_default(),
            length: sanitize_float(edge.length_m),
            harassment_risk: sanitize_float(edge.harassment_risk),
            cameras_count: edge.cameras_count,
            incidents_count: edge.incidents_count,
            risk_score: sanitize_float(edge.risk_score),
            geometry,
        });
    }
    Ok(details)
}

fn route_edge_id(graph: &Graph, src: &VertexId, dst: &VertexId) -> Result<EdgeId, AppError> {
    graph.edge_between(src, dst).ok_or_else(|| {
        AppError::InvalidQuery(format!(
            "route traverses nonexistent edge ({})-({})",
            src, dst
        ))
    })
}
