use super::super::{dijkstra, SearchError, SearchGraph, SearchResult};
use crate::model::network::{Edge, EdgeId, Graph, MinRatios, NetworkError, Vertex, VertexId};
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

/// default number of alternative routes returned by a k-shortest query.
pub const DEFAULT_K: usize = 3;

/// an implementation of Yen's k-shortest paths algorithm as described in
/// the paper
///
/// Yen, Jin Y. "Finding the k shortest loopless paths in a network."
/// Management Science 17.11 (1971): 712-716.
///
/// each accepted path spawns spur searches that exclude the edges of
/// previously accepted paths sharing the same root prefix, plus the root
/// vertices themselves, which guarantees every candidate is a new simple
/// path. candidates pool in a min-heap, so accepted costs are
/// non-decreasing.
///
/// # Returns
///
/// Up to `k` pairwise-distinct simple paths in non-decreasing cost order.
/// fewer when the graph does not permit `k` alternatives; `NoPathExists`
/// when there is no route at all.
pub fn run(
    graph: &Graph,
    source: VertexId,
    target: VertexId,
    k: usize,
    optimization: &Optimization,
    termination: &TerminationModel,
) -> Result<Vec<SearchResult>, SearchError> {
    if k == 0 {
        return Ok(vec![]);
    }

    // base case: the true shortest path
    let shortest = dijkstra::run(graph, source, target, optimization, termination)?;
    let mut accepted: Vec<SearchResult> = vec![shortest];

    let mut candidates: CandidatePool = BinaryHeap::new();
    let mut seen_paths: HashSet<Vec<VertexId>> = HashSet::new();
    let mut sequence: u64 = 0;

    let start_time = Instant::now();
    let mut iterations: u64 = 0;

    while accepted.len() < k {
        let prev_path = match accepted.last() {
            Some(result) => result.path.clone(),
            None => break,
        };

        // branch off every vertex of the most recently accepted path
        for spur_idx in 0..prev_path.len().saturating_sub(1) {
            termination.test(&start_time, iterations)?;
            iterations += 1;

            let spur_vertex = prev_path[spur_idx];
            let root = &prev_path[..=spur_idx];

            // cut the edges with which previously accepted paths leave
            // this root, and ban re-entering the root itself
            let mut banned_edges: HashSet<EdgeId> = HashSet::new();
            for result in accepted.iter() {
                if result.path.len() > spur_idx + 1 && result.path[..=spur_idx] == *root {
                    if let Some(edge_id) =
                        graph.edge_between(&result.path[spur_idx], &result.path[spur_idx + 1])
                    {
                        banned_edges.insert(edge_id);
                    }
                }
            }
            let banned_vertices: HashSet<VertexId> = root[..spur_idx].iter().copied().collect();

            let view = EdgeCutView {
                graph,
                banned_edges,
                banned_vertices,
            };
            let spur = match dijkstra::run(&view, spur_vertex, target, optimization, termination) {
                Ok(result) => result,
                Err(SearchError::NoPathExists(_, _)) => continue,
                Err(e) => return Err(e),
            };

            let mut candidate_path: Vec<VertexId> = root[..spur_idx].to_vec();
            candidate_path.extend(spur.path);
            if seen_paths.insert(candidate_path.clone()) {
                let cost = super::super::path_cost(graph, &candidate_path, optimization)?;
                sequence += 1;
                candidates.push(Reverse((
                    OrderedFloat(cost),
                    sequence,
                    candidate_path,
                    spur.nodes_explored,
                )));
            }
        }

        match candidates.pop() {
            None => break,
            Some(Reverse((OrderedFloat(cost), _, path, nodes_explored))) => {
                accepted.push(SearchResult {
                    path,
                    cost,
                    nodes_explored,
                });
            }
        }
    }

    Ok(accepted)
}

type CandidatePool = BinaryHeap<Reverse<(OrderedFloat<f64>, u64, Vec<VertexId>, usize)>>;

/// a view of the master graph with a set of edges and vertices removed,
/// used for the spur searches. read-only, like the corridor view.
struct EdgeCutView<'g> {
    graph: &'g Graph,
    banned_edges: HashSet<EdgeId>,
    banned_vertices: HashSet<VertexId>,
}

impl SearchGraph for EdgeCutView<'_> {
    fn contains_vertex(&self, vertex_id: &VertexId) -> bool {
        vertex_id.0 < self.graph.n_vertices() && !self.banned_vertices.contains(vertex_id)
    }

    fn out_edges_iter<'a>(
        &'a self,
        src: VertexId,
    ) -> Box<dyn Iterator<Item = (EdgeId, VertexId)> + 'a> {
        Box::new(
            self.graph
                .out_edges_iter(src)
                .filter(|(edge_id, terminal)| {
                    !self.banned_edges.contains(edge_id) && !self.banned_vertices.contains(terminal)
                }),
        )
    }

    fn get_edge(&self, edge_id: &EdgeId) -> Result<&Edge, NetworkError> {
        self.graph.get_edge(edge_id)
    }

    fn get_vertex(&self, vertex_id: &VertexId) -> Result<&Vertex, NetworkError> {
        self.graph.get_vertex(vertex_id)
    }

    fn n_vertices(&self) -> usize {
        self.graph.n_vertices()
    }

    fn min_ratios(&self) -> MinRatios {
        self.graph.min_ratios
    }
}
