use crate::model::network::{Vertex, VertexId};
use geo::{coord, Point};
use rstar::{PointDistance, RTreeObject, AABB};

/// point entry of the vertex spatial index.
#[derive(Clone)]
pub struct VertexRTreeRecord {
    pub vertex_id: VertexId,
    pub envelope: AABB<Point<f64>>,
}

impl VertexRTreeRecord {
    pub fn new(vertex: &Vertex) -> VertexRTreeRecord {
        let point = Point(coord! {x: vertex.x(), y: vertex.y()});
        VertexRTreeRecord {
            vertex_id: vertex.vertex_id,
            envelope: AABB::from_corners(point, point),
        }
    }
}

impl RTreeObject for VertexRTreeRecord {
    type Envelope = AABB<Point<f64>>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for VertexRTreeRecord {
    fn distance_2(&self, point: &Point<f64>) -> f64 {
        self.envelope.distance_2(point)
    }
}
