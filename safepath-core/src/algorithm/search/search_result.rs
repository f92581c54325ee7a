use crate::model::network::VertexId;

/// outcome of a single path search: the ordered vertex sequence from source
/// to target, its total cost under the query's optimization, and how many
/// vertices the search expanded along the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub path: Vec<VertexId>,
    pub cost: f64,
    pub nodes_explored: usize,
}

impl SearchResult {
    /// result for a query whose source and target snap to the same vertex
    pub fn trivial(vertex_id: VertexId) -> SearchResult {
        SearchResult {
            path: vec![vertex_id],
            cost: 0.0,
            nodes_explored: 0,
        }
    }
}
