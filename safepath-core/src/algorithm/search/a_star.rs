use super::cost_estimate::CostEstimateFunction;
use super::search_tree::{vertex_oriented_route, SearchTreeBranch};
use super::{SearchError, SearchGraph, SearchResult};
use crate::model::network::VertexId;
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::Instant;

/// run an A* search over the given directed graph (or subgraph view) from
/// `source` to `target`, minimizing the edge weight selected by
/// `optimization`. the cost estimate is the data-driven admissible bound of
/// [`CostEstimateFunction`].
pub fn run<G: SearchGraph + ?Sized>(
    graph: &G,
    source: VertexId,
    target: VertexId,
    optimization: &Optimization,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    let target_coordinate = graph.get_vertex(&target)?.coordinate;
    let estimate =
        CostEstimateFunction::new(target_coordinate, *optimization, graph.min_ratios());
    run_with_estimate(graph, source, target, optimization, Some(&estimate), termination)
}

/// the shared best-first loop behind both A* and Dijkstra; a `None`
/// estimate degenerates to Dijkstra's uniform-cost search.
///
/// the frontier is a keyed priority queue ranked by `g + h`; re-discovering
/// a vertex with a better traversal cost re-inserts it via `push_increase`,
/// so the search stays correct for admissible heuristics even when they are
/// not perfectly consistent.
pub(crate) fn run_with_estimate<G: SearchGraph + ?Sized>(
    graph: &G,
    source: VertexId,
    target: VertexId,
    optimization: &Optimization,
    estimate: Option<&CostEstimateFunction>,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    if !graph.contains_vertex(&source) || !graph.contains_vertex(&target) {
        return Err(SearchError::NoPathExists(source, target));
    }
    if source == target {
        return Ok(SearchResult::trivial(source));
    }

    // context for the search: frontier priority queue, g-scores, and the
    // predecessor tree the route is reconstructed from
    let mut frontier: PriorityQueue<VertexId, Reverse<OrderedFloat<f64>>> = PriorityQueue::new();
    let mut traversal_costs: HashMap<VertexId, f64> = HashMap::new();
    let mut tree: HashMap<VertexId, SearchTreeBranch> = HashMap::new();

    traversal_costs.insert(source, 0.0);
    let origin_estimate = match estimate {
        Some(est) => est.estimate(&graph.get_vertex(&source)?.coordinate),
        None => 0.0,
    };
    frontier.push(source, Reverse(OrderedFloat(origin_estimate)));

    let start_time = Instant::now();
    let mut iterations: u64 = 0;
    let mut nodes_explored: usize = 0;

    loop {
        termination.test(&start_time, iterations)?;

        let current = match advance_search(&mut frontier, source, target)? {
            None => break,
            Some(vertex_id) => vertex_id,
        };
        nodes_explored += 1;

        let current_gscore = *traversal_costs.get(&current).unwrap_or(&f64::INFINITY);

        for (edge_id, terminal) in graph.out_edges_iter(current) {
            let edge = graph.get_edge(&edge_id)?;
            let edge_cost = edge.weight(optimization);
            let tentative_gscore = current_gscore + edge_cost;
            let existing_gscore = *traversal_costs.get(&terminal).unwrap_or(&f64::INFINITY);
            if tentative_gscore < existing_gscore {
                traversal_costs.insert(terminal, tentative_gscore);
                tree.insert(
                    terminal,
                    SearchTreeBranch {
                        terminal_vertex: current,
                        edge_id,
                        edge_cost,
                    },
                );
                let dst_h_cost = match estimate {
                    Some(est) => est.estimate(&graph.get_vertex(&terminal)?.coordinate),
                    None => 0.0,
                };
                frontier.push_increase(
                    terminal,
                    Reverse(OrderedFloat(tentative_gscore + dst_h_cost)),
                );
            }
        }
        iterations += 1;
    }

    log::debug!(
        "search iterations: {}, size of search tree: {}",
        iterations,
        tree.len()
    );

    let cost = *traversal_costs.get(&target).ok_or_else(|| {
        SearchError::InternalError(format!("target {} settled without a traversal cost", target))
    })?;
    let path = vertex_oriented_route(source, target, &tree)?;
    Ok(SearchResult {
        path,
        cost,
        nodes_explored,
    })
}

/// grab the next vertex to expand, handling the termination conditions:
/// reaching the target ends the search (Ok(None)); exhausting the frontier
/// without reaching it means no path exists.
fn advance_search(
    frontier: &mut PriorityQueue<VertexId, Reverse<OrderedFloat<f64>>>,
    source: VertexId,
    target: VertexId,
) -> Result<Option<VertexId>, SearchError> {
    match frontier.pop() {
        None => Err(SearchError::NoPathExists(source, target)),
        Some((current, _)) if current == target => Ok(None),
        Some((current, _)) => Ok(Some(current)),
    }
}
