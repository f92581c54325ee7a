pub mod a_star;
pub mod backtracking;
pub mod bellman_ford;
pub mod branch_and_bound;
pub mod corridor;
mod cost_estimate;
pub mod dijkstra;
pub mod greedy;
pub mod ksp;
mod search_error;
mod search_graph;
mod search_result;
mod search_tree;
#[cfg(test)]
pub(crate) mod test_graphs;

pub use corridor::Corridor;
pub use cost_estimate::CostEstimateFunction;
pub use search_error::SearchError;
pub use search_graph::SearchGraph;
pub use search_result::SearchResult;
pub use search_tree::{vertex_oriented_route, SearchTreeBranch};

use crate::model::network::{Graph, VertexId};
use crate::model::optimization::Optimization;

/// total cost of a vertex path under the given optimization, summing the
/// weight of the retained edge between each consecutive pair.
pub fn path_cost(
    graph: &Graph,
    path: &[VertexId],
    optimization: &Optimization,
) -> Result<f64, SearchError> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let edge_id = graph.edge_between(&pair[0], &pair[1]).ok_or_else(|| {
            SearchError::InternalError(format!(
                "path traverses nonexistent edge ({})-({})",
                pair[0], pair[1]
            ))
        })?;
        total += graph.get_edge(&edge_id)?.weight(optimization);
    }
    Ok(total)
}
