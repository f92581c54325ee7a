use super::{a_star, SearchError, SearchGraph, SearchResult};
use crate::model::network::VertexId;
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;

/// run Dijkstra's algorithm over the given directed graph (or subgraph
/// view) from `source` to `target`. implemented as the best-first loop of
/// [`a_star`] with a zero cost estimate, which makes the identical-optima
/// contract between the two algorithms true by construction.
pub fn run<G: SearchGraph + ?Sized>(
    graph: &G,
    source: VertexId,
    target: VertexId,
    optimization: &Optimization,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    a_star::run_with_estimate(graph, source, target, optimization, None, termination)
}

#[cfg(test)]
mod tests {
    use super::super::test_graphs;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shortest_route_around_the_box() {
        let (graph, _) = test_graphs::box_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Distance,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(
            result.path,
            vec![VertexId(0), VertexId(3), VertexId(2), VertexId(1)]
        );
        assert_relative_eq!(result.cost, 5200.0);
        assert!(result.nodes_explored >= result.path.len() - 1);
    }

    #[test]
    fn test_all_zero_incident_counts_yield_zero_cost_path() {
        // when every incident count is zero the optimum is a zero-cost
        // path found by tie-breaking, not an error
        let (graph, _) = test_graphs::box_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(2),
            &Optimization::Incidents,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_relative_eq!(result.cost, 0.0);
        assert!(result.path.len() >= 2);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let (graph, _) = test_graphs::box_world();
        let first = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Risk,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        let second = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Risk,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_deadline_terminates_query() {
        let (graph, _) = test_graphs::box_world();
        let termination = TerminationModel::QueryRuntimeLimit {
            limit: std::time::Duration::ZERO,
            frequency: 1,
        };
        let result = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Distance,
            &termination,
        );
        assert!(matches!(result, Err(SearchError::QueryTerminated { .. })));
    }
}
