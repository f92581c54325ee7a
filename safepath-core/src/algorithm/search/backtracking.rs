use super::{SearchError, SearchGraph, SearchResult};
use crate::model::network::{EdgeId, VertexId};
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;
use std::collections::HashSet;
use std::time::Instant;

/// maximum number of vertices a candidate path may contain; deeper branches
/// are pruned, so the returned optimum is the best simple path within this
/// depth.
pub const MAX_DEPTH: usize = 100;

/// one suspended depth-first position: the cost to reach it and a cursor
/// over its neighbor snapshot. the vertex itself is the matching entry of
/// the path stack.
struct Frame {
    cost: f64,
    neighbors: Vec<(EdgeId, VertexId)>,
    next: usize,
}

/// exhaustive depth-first search for the cheapest simple path, with
/// branch pruning on the incumbent best cost, the caller's `max_cost`
/// budget, and the depth bound.
///
/// the recursion of the classic formulation is replaced by an explicit
/// frame stack, which bounds stack usage independently of the depth limit
/// and gives the termination model a natural per-iteration checkpoint.
pub fn run<G: SearchGraph + ?Sized>(
    graph: &G,
    source: VertexId,
    target: VertexId,
    optimization: &Optimization,
    max_cost: f64,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    if !graph.contains_vertex(&source) || !graph.contains_vertex(&target) {
        return Err(SearchError::NoPathExists(source, target));
    }

    let mut nodes_explored: usize = 1;
    if source == target {
        return Ok(SearchResult {
            path: vec![source],
            cost: 0.0,
            nodes_explored,
        });
    }

    let mut best_path: Option<Vec<VertexId>> = None;
    let mut best_cost = f64::INFINITY;

    let mut path: Vec<VertexId> = vec![source];
    let mut visited: HashSet<VertexId> = HashSet::from([source]);
    let mut stack: Vec<Frame> = vec![Frame {
        cost: 0.0,
        neighbors: graph.out_edges_iter(source).collect(),
        next: 0,
    }];

    let start_time = Instant::now();
    let mut iterations: u64 = 0;

    // the frame borrow must end before the stack itself is pushed or
    // popped, so each iteration first resolves to one of these steps
    enum Step {
        Unwind,
        Stay,
        Descend(VertexId, f64),
    }

    while !stack.is_empty() {
        termination.test(&start_time, iterations)?;
        iterations += 1;

        let step = match stack.last_mut() {
            None => break,
            Some(frame) if frame.next >= frame.neighbors.len() => Step::Unwind,
            Some(frame) => {
                let (edge_id, neighbor) = frame.neighbors[frame.next];
                frame.next += 1;
                if visited.contains(&neighbor) {
                    Step::Stay
                } else {
                    let new_cost = frame.cost + graph.get_edge(&edge_id)?.weight(optimization);
                    if new_cost >= best_cost || new_cost > max_cost {
                        Step::Stay
                    } else {
                        nodes_explored += 1;
                        if neighbor == target {
                            path.push(neighbor);
                            best_cost = new_cost;
                            best_path = Some(path.clone());
                            path.pop();
                            Step::Stay
                        } else if path.len() >= MAX_DEPTH {
                            // the depth bound blocks any further descent
                            Step::Stay
                        } else {
                            Step::Descend(neighbor, new_cost)
                        }
                    }
                }
            }
        };

        match step {
            Step::Stay => {}
            Step::Unwind => {
                stack.pop();
                if let Some(done) = path.pop() {
                    visited.remove(&done);
                }
            }
            Step::Descend(neighbor, new_cost) => {
                visited.insert(neighbor);
                path.push(neighbor);
                stack.push(Frame {
                    cost: new_cost,
                    neighbors: graph.out_edges_iter(neighbor).collect(),
                    next: 0,
                });
            }
        }
    }

    match best_path {
        Some(path) => Ok(SearchResult {
            path,
            cost: best_cost,
            nodes_explored,
        }),
        None => Err(SearchError::NoPathExists(source, target)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{dijkstra, test_graphs};
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finds_optimum_on_box_world() {
        let (graph, _) = test_graphs::box_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Distance,
            f64::INFINITY,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        let optimal = dijkstra::run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Distance,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_relative_eq!(result.cost, optimal.cost);
        assert_eq!(result.path, optimal.path);
    }

    #[test]
    fn test_escapes_the_lure() {
        // exhaustive search is immune to the lure that traps greedy
        let (graph, _) = test_graphs::lure_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(3),
            &Optimization::Risk,
            f64::INFINITY,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(result.path, vec![VertexId(0), VertexId(2), VertexId(3)]);
        assert_relative_eq!(result.cost, 0.4);
    }

    #[test]
    fn test_max_cost_budget_prunes_everything() {
        let (graph, _) = test_graphs::box_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(1),
            &Optimization::Distance,
            100.0,
            &TerminationModel::Unbounded,
        );
        assert!(matches!(result, Err(SearchError::NoPathExists(_, _))));
    }

    #[test]
    fn test_depth_bound_excludes_long_chains() {
        // a chain longer than MAX_DEPTH vertices is the only route, so the
        // bounded search must give up
        let n = MAX_DEPTH + 20;
        let vertices: Vec<(f64, f64)> = (0..n).map(|i| (i as f64 * 1e-4, 0.0)).collect();
        let edges: Vec<(usize, usize, f64, f64)> =
            (0..n - 1).map(|i| (i, i + 1, 50.0, 0.1)).collect();
        let (graph, _) = test_graphs::build(&vertices, &edges);
        let result = run(
            &graph,
            VertexId(0),
            VertexId(n - 1),
            &Optimization::Distance,
            f64::INFINITY,
            &TerminationModel::Unbounded,
        );
        assert!(matches!(result, Err(SearchError::NoPathExists(_, _))));

        // while a target inside the bound is still found
        let within = run(
            &graph,
            VertexId(0),
            VertexId(50),
            &Optimization::Distance,
            f64::INFINITY,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(within.path.len(), 51);
    }

    #[test]
    fn test_source_equals_target() {
        let (graph, _) = test_graphs::box_world();
        let result = run(
            &graph,
            VertexId(2),
            VertexId(2),
            &Optimization::Distance,
            f64::INFINITY,
            &TerminationModel::Unbounded,
        )
        .unwrap();
        assert_eq!(result.path, vec![VertexId(2)]);
        assert_relative_eq!(result.cost, 0.0);
    }
}
