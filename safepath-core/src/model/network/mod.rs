mod edge;
mod graph;
mod graph_builder;
mod graph_loader;
mod ids;
mod network_error;
mod vertex;

pub use edge::Edge;
pub use graph::{DenseAdjacencyList, Graph, MinRatios};
pub use graph_builder::GraphBuilder;
pub use graph_loader::graph_from_rows;
pub use ids::{EdgeId, VertexId};
pub use network_error::NetworkError;
pub use vertex::Vertex;
