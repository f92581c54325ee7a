use super::{Edge, EdgeId, NetworkError, Vertex, VertexId};
use indexmap::IndexMap;

/// a graph adjacency list with an entry (possibly empty) for each VertexId
/// in the Graph. `IndexMap` preserves insertion order, which makes neighbor
/// iteration deterministic for a given build.
pub type DenseAdjacencyList = Box<[IndexMap<EdgeId, VertexId>]>;

/// the smallest positive `edge.weight / edge.length_m` ratio observed during
/// graph construction, per non-distance optimization. each value is a true
/// lower bound on the marginal cost per meter and therefore yields an
/// admissible A* heuristic when multiplied by a straight-line distance.
/// zero when no edge produced a positive ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MinRatios {
    pub combined: f64,
    pub risk: f64,
    pub incidents: f64,
}

/// Street network topology represented as an adjacency list. The `EdgeId`
/// and `VertexId` values correspond to edge and vertex indices in the
/// `edges` and `vertices` vectors.
///
/// The graph is immutable after construction (see [`super::GraphBuilder`]):
/// queries never mutate it, so a single instance can serve concurrent
/// searches without locking.
///
/// # Arguments
///
/// * `vertices` - for each `VertexId`, the corresponding `Vertex` record
/// * `edges` - for each `EdgeId`, the corresponding `Edge` record
/// * `adj` - the forward-oriented adjacency list
/// * `rev` - the reverse-oriented adjacency list
/// * `min_ratios` - global cost-per-meter lower bounds for A*
#[derive(Debug)]
pub struct Graph {
    pub vertices: Box<[Vertex]>,
    pub edges: Box<[Edge]>,
    pub adj: DenseAdjacencyList,
    pub rev: DenseAdjacencyList,
    pub min_ratios: MinRatios,
}

impl Graph {
    /// number of edges in the Graph
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// number of vertices in the Graph
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// helper function for creating a range of all vertex ids in the graph.
    /// uses the knowledge that all ids are unique and consecutive integers
    /// beginning at zero.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.n_vertices()).map(VertexId)
    }

    /// retrieve an `Edge` record from the graph
    pub fn get_edge(&self, edge_id: &EdgeId) -> Result<&Edge, NetworkError> {
        match self.edges.get(edge_id.0) {
            None => Err(NetworkError::EdgeNotFound(*edge_id)),
            Some(edge) => Ok(edge),
        }
    }

    /// retrieve a `Vertex` record from the graph
    pub fn get_vertex(&self, vertex_id: &VertexId) -> Result<&Vertex, NetworkError> {
        match self.vertices.get(vertex_id.0) {
            None => Err(NetworkError::VertexNotFound(*vertex_id)),
            Some(vertex) => Ok(vertex),
        }
    }

    /// builds an iterator over the outbound edges that leave this `VertexId`,
    /// in adjacency insertion order.
    pub fn out_edges_iter<'a>(
        &'a self,
        src: VertexId,
    ) -> Box<dyn Iterator<Item = (EdgeId, VertexId)> + 'a> {
        match self.adj.get(src.0) {
            Some(out_map) => Box::new(out_map.iter().map(|(e, v)| (*e, *v))),
            None => Box::new(std::iter::empty()),
        }
    }

    /// builds an iterator over the inbound edges that arrive at this
    /// `VertexId`, in adjacency insertion order.
    pub fn in_edges_iter<'a>(
        &'a self,
        dst: VertexId,
    ) -> Box<dyn Iterator<Item = (EdgeId, VertexId)> + 'a> {
        match self.rev.get(dst.0) {
            Some(in_map) => Box::new(in_map.iter().map(|(e, v)| (*e, *v))),
            None => Box::new(std::iter::empty()),
        }
    }

    /// the single edge retained between a `(src, dst)` vertex pair, if any.
    /// parallel edges collapse at build time (last write wins), so at most
    /// one id can match.
    pub fn edge_between(&self, src: &VertexId, dst: &VertexId) -> Option<EdgeId> {
        self.adj.get(src.0).and_then(|out_map| {
            out_map
                .iter()
                .find(|(_, terminal)| *terminal == dst)
                .map(|(edge_id, _)| *edge_id)
        })
    }

    /// retrieve the triplet of `Vertex` -> `Edge` -> `Vertex` for some `EdgeId`
    pub fn edge_triplet(&self, edge_id: &EdgeId) -> Result<(&Vertex, &Edge, &Vertex), NetworkError> {
        let edge = self.get_edge(edge_id)?;
        let src = self.get_vertex(&edge.src_vertex_id)?;
        let dst = self.get_vertex(&edge.dst_vertex_id)?;
        Ok((src, edge, dst))
    }
}
