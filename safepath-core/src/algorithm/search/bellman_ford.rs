use super::{SearchError, SearchGraph, SearchResult};
use crate::model::network::{EdgeId, VertexId};
use crate::model::optimization::Optimization;
use crate::model::termination::TerminationModel;
use std::time::Instant;

/// run the Bellman-Ford algorithm over the given directed graph (or
/// subgraph view) from `source` to `target`.
///
/// relaxation proceeds in up to `|V| - 1` rounds with an early exit once a
/// round relaxes nothing. the loader guarantees non-negative weights, so
/// the closing negative-cycle scan is an invariant check rather than an
/// expected outcome; it reports [`SearchError::NegativeCycle`] if the
/// guarantee is ever broken.
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
    if source == target {
        return Ok(SearchResult::trivial(source));
    }

    let n = graph.n_vertices();
    let mut dist: Vec<f64> = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<(VertexId, EdgeId)>> = vec![None; n];
    dist[source.0] = 0.0;

    let start_time = Instant::now();
    for round in 0..n.saturating_sub(1) {
        termination.test(&start_time, round as u64)?;
        if !relax_round(graph, optimization, &mut dist, &mut pred)? {
            break;
        }
    }

    // a further relaxable edge after |V| - 1 rounds implies a negative cycle
    if let Some(vertex_id) = find_relaxable(graph, optimization, &dist)? {
        return Err(SearchError::NegativeCycle(vertex_id));
    }

    if !dist[target.0].is_finite() {
        return Err(SearchError::NoPathExists(source, target));
    }

    let nodes_explored = dist.iter().filter(|d| d.is_finite()).count();
    let path = reconstruct(source, target, &pred)?;
    Ok(SearchResult {
        path,
        cost: dist[target.0],
        nodes_explored,
    })
}

/// one full relaxation pass; returns whether any distance improved.
fn relax_round<G: SearchGraph + ?Sized>(
    graph: &G,
    optimization: &Optimization,
    dist: &mut [f64],
    pred: &mut [Option<(VertexId, EdgeId)>],
) -> Result<bool, SearchError> {
    let mut relaxed = false;
    for idx in 0..dist.len() {
        let vertex_id = VertexId(idx);
        if !graph.contains_vertex(&vertex_id) || !dist[idx].is_finite() {
            continue;
        }
        for (edge_id, terminal) in graph.out_edges_iter(vertex_id) {
            let weight = graph.get_edge(&edge_id)?.weight(optimization);
            let candidate = dist[idx] + weight;
            if candidate < dist[terminal.0] {
                dist[terminal.0] = candidate;
                pred[terminal.0] = Some((vertex_id, edge_id));
                relaxed = true;
            }
        }
    }
    Ok(relaxed)
}

fn find_relaxable<G: SearchGraph + ?Sized>(
    graph: &G,
    optimization: &Optimization,
    dist: &[f64],
) -> Result<Option<VertexId>, SearchError> {
    for idx in 0..dist.len() {
        let vertex_id = VertexId(idx);
        if !graph.contains_vertex(&vertex_id) || !dist[idx].is_finite() {
            continue;
        }
        for (edge_id, terminal) in graph.out_edges_iter(vertex_id) {
            let weight = graph.get_edge(&edge_id)?.weight(optimization);
            if dist[idx] + weight < dist[terminal.0] {
                return Ok(Some(vertex_id));
            }
        }
    }
    Ok(None)
}

fn reconstruct(
    source: VertexId,
    target: VertexId,
    pred: &[Option<(VertexId, EdgeId)>],
) -> Result<Vec<VertexId>, SearchError> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match pred[current.0] {
            Some((previous, _)) => {
                if path.len() > pred.len() {
                    return Err(SearchError::InternalError(String::from(
                        "predecessor chain longer than the vertex count",
                    )));
                }
                path.push(previous);
                current = previous;
            }
            None => return Err(SearchError::VertexMissingFromSearchTree(current)),
        }
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::super::{a_star, dijkstra, test_graphs};
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matches_dijkstra_and_a_star() {
        let (graph, _) = test_graphs::box_world();
        for optimization in [
            Optimization::Distance,
            Optimization::Risk,
            Optimization::Combined,
            Optimization::Incidents,
        ] {
            let bf = run(
                &graph,
                VertexId(0),
                VertexId(1),
                &optimization,
                &TerminationModel::Unbounded,
            )
            .unwrap();
            let dj = dijkstra::run(
                &graph,
                VertexId(0),
                VertexId(1),
                &optimization,
                &TerminationModel::Unbounded,
            )
            .unwrap();
            let asr = a_star::run(
                &graph,
                VertexId(0),
                VertexId(1),
                &optimization,
                &TerminationModel::Unbounded,
            )
            .unwrap();
            assert_relative_eq!(bf.cost, dj.cost, epsilon = 1e-9);
            assert_relative_eq!(bf.cost, asr.cost, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_no_path_to_island() {
        let (graph, _) = test_graphs::disconnected_world();
        let result = run(
            &graph,
            VertexId(0),
            VertexId(5),
            &Optimization::Distance,
            &TerminationModel::Unbounded,
        );
        assert!(matches!(result, Err(SearchError::NoPathExists(_, _))));
    }

    #[test]
    fn test_path_reconstruction() {
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
    }
}
