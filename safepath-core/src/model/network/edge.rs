use super::{EdgeId, VertexId};
use crate::model::optimization::Optimization;

/// represents a single directed street segment in a Graph, carrying the
/// full attribute bundle of the unified dataset: original street attributes,
/// safety metrics, and the derived scores.
///
/// the four optimization weights are fixed fields selected through
/// [`Edge::weight`] rather than a string-keyed attribute dictionary. all
/// weights are finite and non-negative by construction (the loader replaces
/// NaN with zero), which keeps Dijkstra and A* valid.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub src_vertex_id: VertexId,
    pub dst_vertex_id: VertexId,
    /// street name; may be absent in the source data
    pub name: Option<String>,
    /// segment length in meters
    pub length_m: f64,
    /// informational only; the graph is already directed
    pub oneway: bool,
    pub harassment_risk: f64,
    pub cameras_count: u32,
    pub incidents_count: u32,
    pub incidents_severity: f64,
    /// composite risk score, normalized to [0, 1]
    pub risk_score: f64,
    /// blended distance+risk cost, normalized to [0, 1]
    pub combined_cost: f64,
}

impl Edge {
    /// the scalar cost of traversing this edge under the given optimization.
    pub fn weight(&self, optimization: &Optimization) -> f64 {
        match optimization {
            Optimization::Distance => self.length_m,
            Optimization::Risk => self.risk_score,
            Optimization::Combined => self.combined_cost,
            Optimization::Incidents => self.incidents_count as f64,
        }
    }
}
