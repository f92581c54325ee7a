use crate::model::network::EdgeId;
use geo::{Point, Rect};
use rstar::{RTreeObject, AABB};

/// rectangle entry of the edge spatial index, covering the bounding box of
/// one edge's geometry.
#[derive(Clone)]
pub struct EdgeRTreeRecord {
    pub edge_id: EdgeId,
    pub envelope: AABB<Point<f64>>,
}

impl EdgeRTreeRecord {
    pub fn new(edge_id: EdgeId, bbox: &Rect<f64>) -> EdgeRTreeRecord {
        EdgeRTreeRecord {
            edge_id,
            envelope: AABB::from_corners(Point(bbox.min()), Point(bbox.max())),
        }
    }
}

impl RTreeObject for EdgeRTreeRecord {
    type Envelope = AABB<Point<f64>>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
