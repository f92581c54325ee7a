use super::{SearchError, SearchGraph};
use crate::model::map::MapModel;
use crate::model::network::{Edge, EdgeId, Graph, MinRatios, NetworkError, Vertex, VertexId};
use crate::util::geo::{degree_buffer, endpoint_bbox, expand_rect, straight_line_meters};
use geo::Rect;

/// floor of the corridor margin in meters.
pub const INITIAL_MARGIN_METERS: f64 = 300.0;
/// fraction of the endpoint straight-line distance added as margin.
pub const MARGIN_FRACTION: f64 = 0.25;
/// multiplier applied to the degree buffers on each failed attempt.
pub const GROWTH_FACTOR: f64 = 1.5;
/// number of expansion attempts before giving up on the corridor.
pub const MAX_ATTEMPTS: u32 = 3;

/// a corridor-restricted view of the master graph: only edges whose
/// precomputed bbox intersects the corridor bbox are traversable, and only
/// their endpoints count as present.
///
/// the view filters adjacency iteration over the shared graph instead of
/// materializing a second graph, so building one allocates two bitmaps and
/// can never mutate shared state. any path found in the view is trivially a
/// path in the full graph.
pub struct Corridor<'g> {
    graph: &'g Graph,
    admitted_edges: Vec<bool>,
    admitted_vertices: Vec<bool>,
    /// the expanded bbox that finally admitted both endpoints
    pub bbox: Rect<f64>,
    /// how many expansion attempts were needed (1-based)
    pub attempts: u32,
    /// number of edges admitted into the corridor
    pub n_edges: usize,
}

impl<'g> Corridor<'g> {
    /// selects a corridor between two snapped endpoints.
    ///
    /// the margin starts at `max(300 m, 0.25 x straight-line distance)`,
    /// converted to degree buffers at the endpoints' mean latitude. if
    /// either endpoint fails to land in the corridor, the buffers grow by
    /// 1.5x, up to [`MAX_ATTEMPTS`] tries; exhausting them reports
    /// [`SearchError::SubgraphRetryExhausted`] and the caller is expected
    /// to fall back to the full graph.
    pub fn select(
        graph: &'g Graph,
        map_model: &MapModel,
        source: VertexId,
        target: VertexId,
    ) -> Result<Corridor<'g>, SearchError> {
        let src = graph.get_vertex(&source)?;
        let dst = graph.get_vertex(&target)?;

        let straight_m = straight_line_meters(&src.coordinate, &dst.coordinate);
        let margin_m = INITIAL_MARGIN_METERS.max(MARGIN_FRACTION * straight_m);
        let ref_lat = (src.y() + dst.y()) / 2.0;
        let (mut dx, mut dy) = degree_buffer(margin_m, ref_lat);
        let endpoints = endpoint_bbox(&src.coordinate, &dst.coordinate);

        for attempt in 1..=MAX_ATTEMPTS {
            let bbox = expand_rect(&endpoints, dx, dy);
            let candidate_edges = map_model.edges_in_bbox(&bbox);

            let mut admitted_edges = vec![false; graph.n_edges()];
            let mut admitted_vertices = vec![false; graph.n_vertices()];
            let mut n_edges = 0;
            for edge_id in candidate_edges {
                let edge = graph.get_edge(&edge_id)?;
                admitted_edges[edge_id.0] = true;
                admitted_vertices[edge.src_vertex_id.0] = true;
                admitted_vertices[edge.dst_vertex_id.0] = true;
                n_edges += 1;
            }

            if admitted_vertices[source.0] && admitted_vertices[target.0] {
                log::debug!(
                    "corridor admitted {} of {} edges on attempt {}",
                    n_edges,
                    graph.n_edges(),
                    attempt
                );
                return Ok(Corridor {
                    graph,
                    admitted_edges,
                    admitted_vertices,
                    bbox,
                    attempts: attempt,
                    n_edges,
                });
            }
            dx *= GROWTH_FACTOR;
            dy *= GROWTH_FACTOR;
        }

        Err(SearchError::SubgraphRetryExhausted(MAX_ATTEMPTS))
    }
}

impl SearchGraph for Corridor<'_> {
    fn contains_vertex(&self, vertex_id: &VertexId) -> bool {
        self.admitted_vertices
            .get(vertex_id.0)
            .copied()
            .unwrap_or(false)
    }

    fn out_edges_iter<'a>(
        &'a self,
        src: VertexId,
    ) -> Box<dyn Iterator<Item = (EdgeId, VertexId)> + 'a> {
        Box::new(
            self.graph
                .out_edges_iter(src)
                .filter(|(edge_id, _)| self.admitted_edges[edge_id.0]),
        )
    }

    fn get_edge(&self, edge_id: &EdgeId) -> Result<&Edge, NetworkError> {
        self.graph.get_edge(edge_id)
    }

    fn get_vertex(&self, vertex_id: &VertexId) -> Result<&Vertex, NetworkError> {
        self.graph.get_vertex(vertex_id)
    }

    fn n_vertices(&self) -> usize {
        self.graph.n_vertices()
    }

    fn min_ratios(&self) -> MinRatios {
        self.graph.min_ratios
    }
}
