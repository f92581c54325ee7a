use safepath_core::algorithm::search::SearchError;
use safepath_core::model::dataset::DatasetError;
use safepath_core::model::map::MapError;
use safepath_core::model::network::NetworkError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("unknown optimization '{0}'")]
    UnknownOptimization(String),
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
    /// graph-theoretic disconnection or an exhausted heuristic with no
    /// Dijkstra rescue; rendered as an empty result at the service boundary
    #[error("no path exists between the requested endpoints")]
    NoPath,
    #[error("invalid query argument: {0}")]
    InvalidQuery(String),
    #[error("failure loading the street dataset: {source}")]
    DatasetFailure {
        #[from]
        source: DatasetError,
    },
    #[error("map failure: {source}")]
    MapFailure {
        #[from]
        source: MapError,
    },
    #[error("network failure: {source}")]
    NetworkFailure {
        #[from]
        source: NetworkError,
    },
    #[error("search failure: {source}")]
    SearchFailure {
        #[from]
        source: SearchError,
    },
    #[error("i/o failure: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
    #[error("serialization failure: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}
