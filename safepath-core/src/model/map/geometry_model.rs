use super::MapError;
use crate::model::network::EdgeId;
use geo::{LineString, Rect};

/// per-edge rendering geometry and precomputed bounding boxes, indexed by
/// `EdgeId`. geometry is carried separately from the graph because the
/// searches never touch it; it exists for bbox pruning and map output.
#[derive(Debug)]
pub struct GeometryModel {
    geometries: Box<[LineString<f64>]>,
    bboxes: Box<[Rect<f64>]>,
}

impl GeometryModel {
    pub fn new(geometries: Vec<LineString<f64>>, bboxes: Vec<Rect<f64>>) -> Self {
        debug_assert_eq!(geometries.len(), bboxes.len());
        Self {
            geometries: geometries.into_boxed_slice(),
            bboxes: bboxes.into_boxed_slice(),
        }
    }

    pub fn n_edges(&self) -> usize {
        self.geometries.len()
    }

    /// the rendering polyline for an edge
    pub fn get(&self, edge_id: &EdgeId) -> Result<&LineString<f64>, MapError> {
        self.geometries
            .get(edge_id.0)
            .ok_or(MapError::GeometryMissing(*edge_id))
    }

    /// the precomputed bounding box for an edge
    pub fn bbox(&self, edge_id: &EdgeId) -> Result<&Rect<f64>, MapError> {
        self.bboxes
            .get(edge_id.0)
            .ok_or(MapError::GeometryMissing(*edge_id))
    }

    pub fn bboxes(&self) -> impl Iterator<Item = (EdgeId, &Rect<f64>)> {
        self.bboxes
            .iter()
            .enumerate()
            .map(|(idx, rect)| (EdgeId(idx), rect))
    }
}
