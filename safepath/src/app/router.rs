use super::geojson_ops;
use super::response::{collect_edge_details, collect_route_stats, sanitize_float, Performance};
use super::{Algorithm, AppError, RouteResult};
use safepath_core::algorithm::search::{
    a_star, backtracking, bellman_ford, branch_and_bound, dijkstra, greedy, ksp, Corridor,
    SearchError, SearchGraph, SearchResult,
};
use safepath_core::model::dataset::read_edge_rows;
use safepath_core::model::map::MapModel;
use safepath_core::model::network::{graph_from_rows, Graph, VertexId};
use safepath_core::model::optimization::Optimization;
use safepath_core::model::termination::TerminationModel;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// the query facade over the street graph and its spatial indexes.
///
/// built once at process start; all state is immutable afterwards, so one
/// instance serves concurrent queries without locking. per-query state
/// (frontiers, visited sets, path buffers) lives inside the search calls
/// and is discarded on return.
pub struct SafePathRouter {
    graph: Arc<Graph>,
    map_model: Arc<MapModel>,
    termination: TerminationModel,
}

impl SafePathRouter {
    /// loads the unified dataset and builds the graph and spatial indexes.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SafePathRouter, AppError> {
        let read_result = read_edge_rows(path)?;
        let (graph, geometry) = graph_from_rows(read_result.rows);
        let map_model = MapModel::new(&graph, geometry);
        Ok(SafePathRouter {
            graph: Arc::new(graph),
            map_model: Arc::new(map_model),
            termination: TerminationModel::Unbounded,
        })
    }

    /// attaches a per-query deadline checked inside every search loop.
    pub fn with_termination(mut self, termination: TerminationModel) -> SafePathRouter {
        self.termination = termination;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn map_model(&self) -> &MapModel {
        &self.map_model
    }

    /// computes one route between two WGS84 coordinates.
    ///
    /// the coordinates snap to their nearest graph vertices. standard
    /// algorithms search the corridor subgraph first and retry on the full
    /// graph; heuristic variants search the full graph and, when they fail
    /// to produce a route, fall back to Dijkstra with
    /// `note = "fallback: Dijkstra"` while keeping the requested algorithm
    /// label. `k_shortest` yields its rank-1 route here; use
    /// [`SafePathRouter::k_shortest`] for the full ranked list.
    pub fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        optimization: &str,
        algorithm: &str,
    ) -> Result<RouteResult, AppError> {
        let opt = Optimization::from_str(optimization)
            .map_err(|_| AppError::UnknownOptimization(optimization.to_string()))?;
        let algo = Algorithm::from_str(algorithm)
            .map_err(|_| AppError::UnknownAlgorithm(algorithm.to_string()))?;

        if algo == Algorithm::KShortest {
            return self
                .k_shortest(origin, destination, ksp::DEFAULT_K, optimization)?
                .into_iter()
                .next()
                .ok_or(AppError::NoPath);
        }

        let started = Instant::now();
        let (source, target) = self.snap(origin, destination)?;
        log::info!(
            "routing {} -> {} with {} optimizing {}",
            source,
            target,
            algo.label(),
            opt.label()
        );

        match self.dispatch(algo, source, target, &opt) {
            Ok(result) => self.assemble(result, &opt, algo.label(), None, None, started),
            Err(e) if algo.is_heuristic_variant() && is_no_path(&e) => {
                log::warn!(
                    "{} produced no route ({}), falling back to Dijkstra",
                    algo.label(),
                    e
                );
                let rescued = dijkstra::run(
                    self.graph.as_ref(),
                    source,
                    target,
                    &opt,
                    &self.termination,
                )
                .map_err(into_app_error)?;
                self.assemble(
                    rescued,
                    &opt,
                    algo.label(),
                    None,
                    Some("fallback: Dijkstra"),
                    started,
                )
            }
            Err(e) => Err(into_app_error(e)),
        }
    }

    /// the top-k simple paths between two coordinates, ranked from 1 in
    /// non-decreasing cost order.
    pub fn k_shortest(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        k: usize,
        optimization: &str,
    ) -> Result<Vec<RouteResult>, AppError> {
        let opt = Optimization::from_str(optimization)
            .map_err(|_| AppError::UnknownOptimization(optimization.to_string()))?;
        let started = Instant::now();
        let (source, target) = self.snap(origin, destination)?;

        let results = ksp::run(
            self.graph.as_ref(),
            source,
            target,
            k,
            &opt,
            &self.termination,
        )
        .map_err(into_app_error)?;

        results
            .into_iter()
            .enumerate()
            .map(|(idx, result)| {
                self.assemble(
                    result,
                    &opt,
                    Algorithm::KShortest.label(),
                    Some(idx + 1),
                    None,
                    started,
                )
            })
            .collect()
    }

    /// runs one query per requested algorithm label, pairing each label
    /// with its outcome. parse failures and no-path outcomes stay in the
    /// list as errors so the service can render one entry per request.
    pub fn compare(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        optimization: &str,
        algorithms: &[&str],
    ) -> Vec<(String, Result<RouteResult, AppError>)> {
        algorithms
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    self.route(origin, destination, optimization, name),
                )
            })
            .collect()
    }

    /// the `/route`-shaped GeoJSON document for a computed route.
    pub fn route_geojson(&self, result: &RouteResult) -> Result<serde_json::Value, AppError> {
        geojson_ops::route_feature_collection(result, &self.map_model)
    }

    /// the per-edge GeoJSON features for a computed route.
    pub fn route_features(&self, result: &RouteResult) -> Result<Vec<geojson::Feature>, AppError> {
        geojson_ops::route_features(result, &self.map_model)
    }

    fn snap(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<(VertexId, VertexId), AppError> {
        let source = self
            .map_model
            .find_nearest_vertex(origin.0, origin.1)
            .map_err(|_| AppError::NoPath)?;
        let target = self
            .map_model
            .find_nearest_vertex(destination.0, destination.1)
            .map_err(|_| AppError::NoPath)?;
        Ok((source, target))
    }

    fn dispatch(
        &self,
        algo: Algorithm,
        source: VertexId,
        target: VertexId,
        opt: &Optimization,
    ) -> Result<SearchResult, SearchError> {
        let graph = self.graph.as_ref();
        match algo {
            Algorithm::Dijkstra | Algorithm::Astar | Algorithm::BellmanFord => {
                self.run_standard(algo, source, target, opt)
            }
            Algorithm::Greedy => greedy::run(graph, source, target, opt, &self.termination),
            Algorithm::Backtracking => backtracking::run(
                graph,
                source,
                target,
                opt,
                f64::INFINITY,
                &self.termination,
            ),
            Algorithm::BranchAndBound => {
                branch_and_bound::run(graph, source, target, opt, &self.termination)
            }
            Algorithm::KShortest => Err(SearchError::InternalError(String::from(
                "k_shortest does not dispatch through the single-route path",
            ))),
        }
    }

    /// corridor-then-full-graph execution for the standard algorithms: a
    /// corridor that cannot admit both endpoints, or that contains them in
    /// disconnected pieces, silently degrades to the full graph.
    fn run_standard(
        &self,
        algo: Algorithm,
        source: VertexId,
        target: VertexId,
        opt: &Optimization,
    ) -> Result<SearchResult, SearchError> {
        let graph = self.graph.as_ref();
        match Corridor::select(graph, &self.map_model, source, target) {
            Ok(corridor) => match run_standard_on(algo, &corridor, source, target, opt, &self.termination) {
                Ok(result) => Ok(result),
                Err(SearchError::NoPathExists(_, _)) => {
                    log::debug!("no route in the corridor subgraph, retrying on the full graph");
                    run_standard_on(algo, graph, source, target, opt, &self.termination)
                }
                Err(e) => Err(e),
            },
            Err(SearchError::SubgraphRetryExhausted(attempts)) => {
                log::debug!(
                    "corridor selection exhausted {} attempts, searching the full graph",
                    attempts
                );
                run_standard_on(algo, graph, source, target, opt, &self.termination)
            }
            Err(e) => Err(e),
        }
    }

    fn assemble(
        &self,
        result: SearchResult,
        opt: &Optimization,
        algorithm_label: &str,
        rank: Option<usize>,
        note: Option<&str>,
        started: Instant,
    ) -> Result<RouteResult, AppError> {
        let graph = self.graph.as_ref();
        let statistics = collect_route_stats(graph, &result.path)?;
        let edges = collect_edge_details(graph, &self.map_model, &result.path)?;
        let path = result
            .path
            .iter()
            .map(|vertex_id| {
                graph
                    .get_vertex(vertex_id)
                    .map(|v| v.to_tuple_underlying())
                    .map_err(AppError::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let performance = Performance {
            execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            nodes_explored: result.nodes_explored,
            nodes_in_path: result.path.len(),
        };

        Ok(RouteResult {
            path,
            cost: sanitize_float(result.cost),
            optimization: opt.label().to_string(),
            algorithm: algorithm_label.to_string(),
            rank,
            statistics,
            edges,
            performance,
            note: note.map(String::from),
        })
    }
}

fn run_standard_on<G: SearchGraph + ?Sized>(
    algo: Algorithm,
    graph: &G,
    source: VertexId,
    target: VertexId,
    opt: &Optimization,
    termination: &TerminationModel,
) -> Result<SearchResult, SearchError> {
    match algo {
        Algorithm::Dijkstra => dijkstra::run(graph, source, target, opt, termination),
        Algorithm::Astar => a_star::run(graph, source, target, opt, termination),
        Algorithm::BellmanFord => bellman_ford::run(graph, source, target, opt, termination),
        _ => Err(SearchError::InternalError(format!(
            "{} is not a standard shortest-path algorithm",
            algo
        ))),
    }
}

/// failures that mean "this algorithm found no route" rather than a
/// malfunction; these trigger the Dijkstra fallback for heuristic variants.
fn is_no_path(error: &SearchError) -> bool {
    matches!(
        error,
        SearchError::NoPathExists(_, _) | SearchError::IterationLimitExceeded(_)
    )
}

fn into_app_error(error: SearchError) -> AppError {
    match error {
        SearchError::NoPathExists(_, _) | SearchError::IterationLimitExceeded(_) => {
            AppError::NoPath
        }
        other => AppError::SearchFailure { source: other },
    }
}
