use super::{EdgeIndex, GeometryModel, MapError, VertexIndex};
use crate::model::network::{EdgeId, Graph, VertexId};
use geo::{LineString, Rect};

/// bundles the vertex and edge spatial indexes with the edge geometry
/// table. built once next to the graph and shared read-only by all queries.
pub struct MapModel {
    pub vertex_index: VertexIndex,
    pub edge_index: EdgeIndex,
    pub geometry: GeometryModel,
}

impl MapModel {
    pub fn new(graph: &Graph, geometry: GeometryModel) -> MapModel {
        let vertex_index = VertexIndex::new(&graph.vertices);
        let edge_index = EdgeIndex::new(&geometry);
        MapModel {
            vertex_index,
            edge_index,
            geometry,
        }
    }

    /// variant built on the linear-scan fallbacks; query semantics are
    /// identical to the r-tree build.
    pub fn new_linear(graph: &Graph, geometry: GeometryModel) -> MapModel {
        let vertex_index = VertexIndex::new_linear(&graph.vertices);
        let edge_index = EdgeIndex::new_linear(&geometry);
        MapModel {
            vertex_index,
            edge_index,
            geometry,
        }
    }

    /// snaps a query coordinate to the nearest graph vertex.
    pub fn find_nearest_vertex(&self, lon: f64, lat: f64) -> Result<VertexId, MapError> {
        self.vertex_index
            .find_nearest_vertex(lon, lat)
            .ok_or(MapError::EmptyVertexIndex)
    }

    /// ids of edges whose precomputed bbox intersects the given bbox.
    pub fn edges_in_bbox(&self, bbox: &Rect<f64>) -> Vec<EdgeId> {
        self.edge_index.edges_in_bbox(bbox)
    }

    /// the rendering polyline for an edge.
    pub fn get(&self, edge_id: &EdgeId) -> Result<&LineString<f64>, MapError> {
        self.geometry.get(edge_id)
    }
}
