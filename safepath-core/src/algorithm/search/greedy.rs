use super::{SearchError, SearchResult};
use crate::model::network::{Graph, VertexId};
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;
use crate::util::geo::straight_line_meters;
use std::collections::HashSet;
use std::time::Instant;

/// iteration cap for the greedy walk; exhausting it reports
/// [`SearchError::IterationLimitExceeded`], which callers treat as no-path.
pub const MAX_ITERATIONS: u64 = 10_000;

/// blend factors of the greedy neighbor score: 70% edge cost, 30%
/// straight-line distance to the goal (in kilometers, to keep the two terms
/// on comparable scales).
const EDGE_COST_FACTOR: f64 = 0.7;
const GOAL_DISTANCE_FACTOR: f64 = 0.3;

/// greedy best-first walk with single-step backtracking, over the full
/// graph.
///
/// from the source, each step moves to the unvisited neighbor minimizing
/// the blended score; a vertex with no unvisited neighbors is popped off
/// the path and the walk resumes from its predecessor. visited vertices are
/// never re-entered, and the reported cost is the sum of all chosen edge
/// weights with nothing subtracted for backtracked steps.
pub fn run(
    graph: &Graph,
    source: VertexId,
    target: VertexId,
    optimization: &Optimization,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    if source.0 >= graph.n_vertices() || target.0 >= graph.n_vertices() {
        return Err(SearchError::NoPathExists(source, target));
    }
    let target_coordinate = graph.get_vertex(&target)?.coordinate;

    let mut path: Vec<VertexId> = vec![source];
    let mut visited: HashSet<VertexId> = HashSet::from([source]);
    let mut total_cost: f64 = 0.0;
    let mut current = source;

    let start_time = Instant::now();
    let mut iterations: u64 = 0;

    while current != target {
        if iterations >= MAX_ITERATIONS {
            return Err(SearchError::IterationLimitExceeded(MAX_ITERATIONS));
        }
        termination.test(&start_time, iterations)?;

        // best unvisited neighbor; strict comparison keeps the first
        // (insertion-order) neighbor on score ties
        let mut best: Option<(f64, VertexId, f64)> = None;
        for (edge_id, neighbor) in graph.out_edges_iter(current) {
            if visited.contains(&neighbor) {
                continue;
            }
            let edge_cost = graph.get_edge(&edge_id)?.weight(optimization);
            let goal_m =
                straight_line_meters(&graph.get_vertex(&neighbor)?.coordinate, &target_coordinate);
            let score = EDGE_COST_FACTOR * edge_cost + GOAL_DISTANCE_FACTOR * (goal_m / 1000.0);
            if best.map_or(true, |(best_score, _, _)| score < best_score) {
                best = Some((score, neighbor, edge_cost));
            }
        }

        match best {
            Some((_, next, edge_cost)) => {
                path.push(next);
                visited.insert(next);
                total_cost += edge_cost;
                current = next;
            }
            None => {
                // dead end: step back one node and try again from there
                if path.len() > 1 {
                    log::debug!("greedy: no unvisited neighbors at {}, backtracking", current);
                    path.pop();
                    current = *path.last().ok_or_else(|| {
                        SearchError::InternalError(String::from(
                            "greedy backtrack emptied the path",
                        ))
                    })?;
                } else {
                    return Err(SearchError::NoPathExists(source, target));
                }
            }
        }
        iterations += 1;
    }

    Ok(SearchResult {
        path,
        cost: total_cost,
        nodes_explored: visited.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::{dijkstra, test_graphs};
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reaches_goal_on_box_world() {
        let (graph, _) = test_graphs::box_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Distance,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(*result.path.first().unwrap(), VertexId(0));
        assert_eq!(*result.path.last().unwrap(), VertexId(1));
    }

    #[test]
    fn test_lure_makes_greedy_suboptimal() {
        // greedy follows the low-risk lure into a high-risk continuation;
        // its cost must still be bounded below by the true optimum
        let (graph, _) = test_graphs::lure_world();
        let greedy = run(
            &graph,
            VertexId(0),
            VertexId(3),
            &Optimization::Risk,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        let optimal = dijkstra::run(
            &graph,
            VertexId(0),
            VertexId(3),
            &Optimization::Risk,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(
            greedy.path,
            vec![VertexId(0), VertexId(1), VertexId(3)],
            "greedy should take the lure"
        );
        assert_relative_eq!(greedy.cost, 0.91);
        assert_relative_eq!(optimal.cost, 0.4);
        assert!(greedy.cost >= optimal.cost);
    }

    #[test]
    fn test_backtracks_out_of_dead_end() {
        // 0 -> 1 is a lure into a dead end; 0 -> 2 -> 3 reaches the goal.
        // vertex 1 sits right next to the goal so greedy tries it first.
        let vertices = [(0.0, 0.0), (0.0195, 0.0), (0.0, 0.01), (0.02, 0.0)];
        let edges = [
            (0, 1, 2_200.0, 0.01),
            (0, 2, 1_200.0, 0.3),
            (2, 3, 2_600.0, 0.1),
        ];
        let (graph, _) = test_graphs::build(&vertices, &edges);
        let result = run(
            &graph,
            VertexId(0),
            VertexId(3),
            &Optimization::Risk,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(result.path, vec![VertexId(0), VertexId(2), VertexId(3)]);
        // the abandoned lure edge still counts toward the reported cost
        assert_relative_eq!(result.cost, 0.01 + 0.3 + 0.1);
    }

    #[test]
    fn test_unreachable_goal_is_no_path() {
        let (graph, _) = test_graphs::disconnected_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(4),
            &Optimization::Distance,
            &TerminationModel::Unbounded,
        );
        assert!(result.is_err());
    }
}
