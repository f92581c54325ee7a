use super::{EdgeRTreeRecord, GeometryModel, VertexRTreeRecord};
use crate::model::network::{EdgeId, Vertex, VertexId};
use geo::{coord, Intersects, Point, Rect};
use ordered_float::OrderedFloat;
use rstar::{RTree, AABB};

/// number of r-tree candidates retrieved for a nearest-vertex query before
/// the exact squared-distance verification pass.
const NEAREST_CANDIDATES: usize = 5;

/// spatial index over the graph vertices, queryable by nearest-to-point and
/// by bounding box. the `Linear` variant exists as a fallback when no r-tree
/// should be built; both variants answer queries identically.
pub enum VertexIndex {
    RTree {
        rtree: RTree<VertexRTreeRecord>,
    },
    Linear {
        /// `(id, position)` pairs in vertex insertion order
        points: Vec<(VertexId, Point<f64>)>,
    },
}

impl VertexIndex {
    /// creates an r-tree index over the vertices in the graph, with
    /// nearest-neighbor searches returning a `VertexId`.
    pub fn new(vertices: &[Vertex]) -> Self {
        let entries: Vec<VertexRTreeRecord> = vertices.iter().map(VertexRTreeRecord::new).collect();
        Self::RTree {
            rtree: RTree::bulk_load(entries),
        }
    }

    /// creates the linear-scan fallback over the same vertices.
    pub fn new_linear(vertices: &[Vertex]) -> Self {
        let points = vertices
            .iter()
            .map(|v| (v.vertex_id, Point(v.coordinate)))
            .collect();
        Self::Linear { points }
    }

    /// finds the vertex nearest to `(lon, lat)` by squared Euclidean
    /// distance in degree space, which preserves the argmin at city scale.
    /// the r-tree variant retrieves the top candidates and verifies them
    /// exactly; ties break toward the lower (earlier-inserted) vertex id.
    /// `None` only when the graph has no vertices.
    pub fn find_nearest_vertex(&self, lon: f64, lat: f64) -> Option<VertexId> {
        let query = Point(coord! {x: lon, y: lat});
        match self {
            VertexIndex::RTree { rtree } => rtree
                .nearest_neighbor_iter(&query)
                .take(NEAREST_CANDIDATES)
                .map(|record| {
                    let center = record.envelope.lower();
                    (squared_degree_distance(&query, &center), record.vertex_id)
                })
                .min_by_key(|(d2, vertex_id)| (OrderedFloat(*d2), *vertex_id))
                .map(|(_, vertex_id)| vertex_id),
            VertexIndex::Linear { points } => points
                .iter()
                .map(|(vertex_id, point)| (squared_degree_distance(&query, point), *vertex_id))
                .min_by_key(|(d2, vertex_id)| (OrderedFloat(*d2), *vertex_id))
                .map(|(_, vertex_id)| vertex_id),
        }
    }

    /// all vertex ids whose position falls within the bbox (inclusive),
    /// in ascending id order.
    pub fn vertices_in_bbox(&self, bbox: &Rect<f64>) -> Vec<VertexId> {
        let mut result = match self {
            VertexIndex::RTree { rtree } => {
                let envelope = AABB::from_corners(Point(bbox.min()), Point(bbox.max()));
                rtree
                    .locate_in_envelope(&envelope)
                    .map(|record| record.vertex_id)
                    .collect::<Vec<_>>()
            }
            VertexIndex::Linear { points } => points
                .iter()
                .filter(|(_, point)| {
                    bbox.min().x <= point.x()
                        && point.x() <= bbox.max().x
                        && bbox.min().y <= point.y()
                        && point.y() <= bbox.max().y
                })
                .map(|(vertex_id, _)| *vertex_id)
                .collect::<Vec<_>>(),
        };
        result.sort_unstable();
        result
    }
}

/// spatial index over the edge bounding boxes, queryable by bbox
/// intersection. as with [`VertexIndex`], the linear fallback is
/// observationally identical.
pub enum EdgeIndex {
    RTree {
        rtree: RTree<EdgeRTreeRecord>,
    },
    Linear {
        bboxes: Vec<(EdgeId, Rect<f64>)>,
    },
}

impl EdgeIndex {
    pub fn new(geometry: &GeometryModel) -> Self {
        let entries: Vec<EdgeRTreeRecord> = geometry
            .bboxes()
            .map(|(edge_id, bbox)| EdgeRTreeRecord::new(edge_id, bbox))
            .collect();
        Self::RTree {
            rtree: RTree::bulk_load(entries),
        }
    }

    pub fn new_linear(geometry: &GeometryModel) -> Self {
        let bboxes = geometry
            .bboxes()
            .map(|(edge_id, bbox)| (edge_id, *bbox))
            .collect();
        Self::Linear { bboxes }
    }

    /// ids of edges whose bbox intersects the query bbox (boundary touches
    /// count), in ascending id order.
    pub fn edges_in_bbox(&self, bbox: &Rect<f64>) -> Vec<EdgeId> {
        let mut result = match self {
            EdgeIndex::RTree { rtree } => {
                let envelope = AABB::from_corners(Point(bbox.min()), Point(bbox.max()));
                rtree
                    .locate_in_envelope_intersecting(&envelope)
                    .map(|record| record.edge_id)
                    .collect::<Vec<_>>()
            }
            EdgeIndex::Linear { bboxes } => bboxes
                .iter()
                .filter(|(_, edge_bbox)| bbox.intersects(edge_bbox))
                .map(|(edge_id, _)| *edge_id)
                .collect::<Vec<_>>(),
        };
        result.sort_unstable();
        result
    }
}

fn squared_degree_distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}
