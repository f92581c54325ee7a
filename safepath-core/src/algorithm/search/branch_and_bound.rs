use super::{SearchError, SearchGraph, SearchResult};
use crate::model::network::VertexId;
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

/// maximum number of vertices a frontier path may contain; longer entries
/// are discarded on pop.
pub const MAX_DEPTH: usize = 100;

/// frontier entries order by `(cost, sequence number)`, so equal-cost
/// entries pop in insertion order.
type Frontier = BinaryHeap<Reverse<(OrderedFloat<f64>, u64, VertexId, Vec<VertexId>)>>;

/// best-first branch-and-bound over simple paths, on the full graph.
///
/// a min-heap keyed by accumulated path cost drives the expansion. three
/// bounds prune the tree: a dominance map of the best cost at which each
/// vertex was expanded, the incumbent best target cost, and the depth
/// limit. the returned route is the cheapest simple path of at most
/// [`MAX_DEPTH`] vertices.
pub fn run<G: SearchGraph + ?Sized>(
    graph: &G,
    source: VertexId,
    target: VertexId,
    optimization: &Optimization,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    if !graph.contains_vertex(&source) || !graph.contains_vertex(&target) {
        return Err(SearchError::NoPathExists(source, target));
    }

    let mut frontier: Frontier = BinaryHeap::new();
    let mut sequence: u64 = 0;
    frontier.push(Reverse((OrderedFloat(0.0), sequence, source, vec![source])));

    let mut best_cost = f64::INFINITY;
    let mut best_path: Option<Vec<VertexId>> = None;
    let mut visited_with_cost: HashMap<VertexId, f64> = HashMap::new();
    let mut nodes_explored: usize = 0;

    let start_time = Instant::now();
    let mut iterations: u64 = 0;

    while let Some(Reverse((OrderedFloat(cost), _, current, path))) = frontier.pop() {
        termination.test(&start_time, iterations)?;
        iterations += 1;
        nodes_explored += 1;

        if current == target {
            if cost < best_cost {
                best_cost = cost;
                best_path = Some(path);
            }
            continue;
        }
        // dominance: skip unless strictly better than the recorded cost
        if let Some(recorded) = visited_with_cost.get(&current) {
            if *recorded <= cost {
                continue;
            }
        }
        visited_with_cost.insert(current, cost);

        if cost >= best_cost || path.len() > MAX_DEPTH {
            continue;
        }

        for (edge_id, neighbor) in graph.out_edges_iter(current) {
            // simple-path constraint
            if path.contains(&neighbor) {
                continue;
            }
            let new_cost = cost + graph.get_edge(&edge_id)?.weight(optimization);
            if new_cost < best_cost {
                sequence += 1;
                let mut new_path = path.clone();
                new_path.push(neighbor);
                frontier.push(Reverse((OrderedFloat(new_cost), sequence, neighbor, new_path)));
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
