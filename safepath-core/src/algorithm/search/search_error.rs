use crate::model::network::{NetworkError, VertexId};
use crate::model::termination::TerminationModelError;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// graph-theoretic disconnection. this is a normal terminal outcome for
    /// a query, not a failure; callers degrade it to an empty result.
    #[error("no path exists between vertices {0} and {1}")]
    NoPathExists(VertexId, VertexId),
    #[error("the search failed due to a road network error: {source}")]
    NetworkFailure {
        #[from]
        source: NetworkError,
    },
    #[error("search gave up after {0} iterations without reaching the target")]
    IterationLimitExceeded(u64),
    #[error("corridor subgraph still missing an endpoint after {0} attempts")]
    SubgraphRetryExhausted(u32),
    #[error("query terminated: {source}")]
    QueryTerminated {
        #[from]
        source: TerminationModelError,
    },
    #[error("negative cycle reachable from vertex {0}")]
    NegativeCycle(VertexId),
    #[error("expected vertex {0} missing from search tree")]
    VertexMissingFromSearchTree(VertexId),
    #[error("internal error due to search logic: {0}")]
    InternalError(String),
}
