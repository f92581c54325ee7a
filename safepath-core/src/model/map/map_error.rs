use crate::model::network::EdgeId;

#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("no map vertices exist for matching")]
    EmptyVertexIndex,
    #[error("geometry table missing edge id {0}")]
    GeometryMissing(EdgeId),
    #[error("failure building spatial index: {0}")]
    BuildError(String),
}
