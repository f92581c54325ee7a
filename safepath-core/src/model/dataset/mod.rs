mod dataset_error;
mod edge_row;
mod loader;

pub use dataset_error::DatasetError;
pub use edge_row::EdgeRow;
pub use loader::{read_edge_rows, EdgeRowsReadResult};
