mod edge_rtree_record;
mod geometry_model;
mod map_error;
mod map_model;
mod spatial_index;
mod vertex_rtree_record;

pub use edge_rtree_record::EdgeRTreeRecord;
pub use geometry_model::GeometryModel;
pub use map_error::MapError;
pub use map_model::MapModel;
pub use spatial_index::{EdgeIndex, VertexIndex};
pub use vertex_rtree_record::VertexRTreeRecord;
