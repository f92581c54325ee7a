use crate::model::network::{Edge, EdgeId, Graph, MinRatios, NetworkError, Vertex, VertexId};

/// the graph surface the searches run against. implemented by the full
/// [`Graph`] and by restricted views of it (the corridor subgraph, the
/// edge-exclusion views used by k-shortest paths), which lets every
/// algorithm run unchanged on either.
///
/// implementations must be read-only: a view filters iteration, it never
/// mutates or copies the master graph's storage.
pub trait SearchGraph {
    /// whether this vertex participates in the (sub)graph
    fn contains_vertex(&self, vertex_id: &VertexId) -> bool;

    /// outbound edges of `src` admitted by this (sub)graph, in the master
    /// graph's deterministic insertion order
    fn out_edges_iter<'a>(&'a self, src: VertexId)
        -> Box<dyn Iterator<Item = (EdgeId, VertexId)> + 'a>;

    fn get_edge(&self, edge_id: &EdgeId) -> Result<&Edge, NetworkError>;

    fn get_vertex(&self, vertex_id: &VertexId) -> Result<&Vertex, NetworkError>;

    /// size of the master id space; subgraph views keep the dense ids of
    /// the graph they restrict
    fn n_vertices(&self) -> usize;

    /// cost-per-meter lower bounds for the A* heuristic. views report the
    /// master graph's constants: a subset of edges can only raise the true
    /// minimum, so the master bound stays admissible.
    fn min_ratios(&self) -> MinRatios;
}

impl SearchGraph for Graph {
    fn contains_vertex(&self, vertex_id: &VertexId) -> bool {
        vertex_id.0 < self.n_vertices()
    }

    fn out_edges_iter<'a>(
        &'a self,
        src: VertexId,
    ) -> Box<dyn Iterator<Item = (EdgeId, VertexId)> + 'a> {
        Graph::out_edges_iter(self, src)
    }

    fn get_edge(&self, edge_id: &EdgeId) -> Result<&Edge, NetworkError> {
        Graph::get_edge(self, edge_id)
    }

    fn get_vertex(&self, vertex_id: &VertexId) -> Result<&Vertex, NetworkError> {
        Graph::get_vertex(self, vertex_id)
    }

    fn n_vertices(&self) -> usize {
        Graph::n_vertices(self)
    }

    fn min_ratios(&self) -> MinRatios {
        self.min_ratios
    }
}
