use super::{Edge, EdgeId, Graph, MinRatios, Vertex, VertexId};
use geo::Coord;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// exact-bits coordinate key used to intern vertices. node identity in the
/// source data is the exact coordinate pair, so bit equality is the correct
/// notion here; nearby-but-distinct coordinates are distinct vertices.
type CoordKey = (OrderedFloat<f64>, OrderedFloat<f64>);

/// accumulates vertices and edges during ingest and freezes them into an
/// immutable [`Graph`].
///
/// vertices are interned on first sight and receive stable integer ids in
/// first-seen order. a repeated `(src, dst)` pair overwrites the staged edge
/// in place, keeping the original `EdgeId` slot: last write wins, matching
/// the overwrite semantics of the dataset-unification pipeline upstream.
///
/// while edges are staged the builder maintains the running minimum
/// cost-per-meter ratios used by the A* heuristics, considering only edges
/// with `length_m > 0` and a strictly positive weight.
#[derive(Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    vertex_lookup: HashMap<CoordKey, VertexId>,
    edge_slots: HashMap<(VertexId, VertexId), EdgeId>,
    min_combined_ratio: Option<f64>,
    min_risk_ratio: Option<f64>,
    min_incident_ratio: Option<f64>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// returns the id for the vertex at the given coordinate, creating it on
    /// first sight.
    pub fn intern_vertex(&mut self, coordinate: Coord<f64>) -> VertexId {
        let key = (OrderedFloat(coordinate.x), OrderedFloat(coordinate.y));
        match self.vertex_lookup.get(&key) {
            Some(vertex_id) => *vertex_id,
            None => {
                let vertex_id = VertexId(self.vertices.len());
                self.vertices.push(Vertex {
                    vertex_id,
                    coordinate,
                });
                self.vertex_lookup.insert(key, vertex_id);
                vertex_id
            }
        }
    }

    /// stages a directed edge between two interned vertices. the `edge_id`
    /// of the provided record is assigned by the builder; callers pass a
    /// default. returns the id the edge landed in, which is reused when a
    /// later row repeats the same `(src, dst)` pair.
    pub fn upsert_edge(&mut self, mut edge: Edge) -> EdgeId {
        self.track_ratios(&edge);
        let key = (edge.src_vertex_id, edge.dst_vertex_id);
        match self.edge_slots.get(&key) {
            Some(edge_id) => {
                edge.edge_id = *edge_id;
                self.edges[edge_id.0] = edge;
                *edge_id
            }
            None => {
                let edge_id = EdgeId(self.edges.len());
                edge.edge_id = edge_id;
                self.edge_slots.insert(key, edge_id);
                self.edges.push(edge);
                edge_id
            }
        }
    }

    fn track_ratios(&mut self, edge: &Edge) {
        if edge.length_m <= 0.0 {
            return;
        }
        track_min_ratio(
            &mut self.min_combined_ratio,
            edge.combined_cost / edge.length_m,
        );
        track_min_ratio(&mut self.min_risk_ratio, edge.risk_score / edge.length_m);
        track_min_ratio(
            &mut self.min_incident_ratio,
            edge.incidents_count as f64 / edge.length_m,
        );
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// freezes the staged vertices and edges into an immutable graph,
    /// building the forward and reverse adjacency lists in edge-id order.
    pub fn finalize(self) -> Graph {
        let mut adj: Vec<IndexMap<EdgeId, VertexId>> = vec![IndexMap::new(); self.vertices.len()];
        let mut rev: Vec<IndexMap<EdgeId, VertexId>> = vec![IndexMap::new(); self.vertices.len()];

        for edge in self.edges.iter() {
            adj[edge.src_vertex_id.0].insert(edge.edge_id, edge.dst_vertex_id);
            rev[edge.dst_vertex_id.0].insert(edge.edge_id, edge.src_vertex_id);
        }

        let min_ratios = MinRatios {
            combined: self.min_combined_ratio.unwrap_or(0.0),
            risk: self.min_risk_ratio.unwrap_or(0.0),
            incidents: self.min_incident_ratio.unwrap_or(0.0),
        };

        Graph {
            vertices: self.vertices.into_boxed_slice(),
            edges: self.edges.into_boxed_slice(),
            adj: adj.into_boxed_slice(),
            rev: rev.into_boxed_slice(),
            min_ratios,
        }
    }
}

fn track_min_ratio(slot: &mut Option<f64>, ratio: f64) {
    if ratio > 0.0 && ratio.is_finite() {
        match slot {
            Some(current) if *current <= ratio => {}
            _ => *slot = Some(ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::optimization::Optimization;
    use approx::assert_relative_eq;
    use geo::coord;

    fn edge(src: VertexId, dst: VertexId, length_m: f64, risk_score: f64) -> Edge {
        Edge {
            edge_id: EdgeId::default(),
            src_vertex_id: src,
            dst_vertex_id: dst,
            name: None,
            length_m,
            oneway: false,
            harassment_risk: 0.0,
            cameras_count: 0,
            incidents_count: 2,
            incidents_severity: 0.0,
            risk_score,
            combined_cost: risk_score / 2.0,
        }
    }

    #[test]
    fn test_intern_vertex_is_stable() {
        let mut builder = GraphBuilder::new();
        let a = builder.intern_vertex(coord! {x: -75.5, y: 6.2});
        let b = builder.intern_vertex(coord! {x: -75.6, y: 6.3});
        let a_again = builder.intern_vertex(coord! {x: -75.5, y: 6.2});
        assert_eq!(a, VertexId(0));
        assert_eq!(b, VertexId(1));
        assert_eq!(a_again, a);
        assert_eq!(builder.n_vertices(), 2);
    }

    #[test]
    fn test_parallel_edge_last_write_wins() {
        let mut builder = GraphBuilder::new();
        let a = builder.intern_vertex(coord! {x: 0.0, y: 0.0});
        let b = builder.intern_vertex(coord! {x: 1.0, y: 0.0});
        let first = builder.upsert_edge(edge(a, b, 100.0, 0.4));
        let second = builder.upsert_edge(edge(a, b, 250.0, 0.8));
        assert_eq!(first, second);
        assert_eq!(builder.n_edges(), 1);

        let graph = builder.finalize();
        let retained = graph.get_edge(&first).unwrap();
        assert_relative_eq!(retained.length_m, 250.0);
        assert_relative_eq!(retained.weight(&Optimization::Risk), 0.8);
    }

    #[test]
    fn test_min_ratios_over_positive_weights_only() {
        let mut builder = GraphBuilder::new();
        let a = builder.intern_vertex(coord! {x: 0.0, y: 0.0});
        let b = builder.intern_vertex(coord! {x: 1.0, y: 0.0});
        let c = builder.intern_vertex(coord! {x: 2.0, y: 0.0});
        // zero-length and zero-weight edges must not contribute ratios
        builder.upsert_edge(edge(a, b, 0.0, 0.9));
        builder.upsert_edge(edge(b, c, 100.0, 0.0));
        builder.upsert_edge(edge(c, a, 200.0, 0.5));

        let graph = builder.finalize();
        assert_relative_eq!(graph.min_ratios.risk, 0.5 / 200.0);
        assert_relative_eq!(graph.min_ratios.combined, 0.25 / 200.0);
        // incidents_count is 2 on every edge; the longest edge minimizes
        // the per-meter ratio
        assert_relative_eq!(graph.min_ratios.incidents, 2.0 / 200.0);
    }

    #[test]
    fn test_min_ratios_default_to_zero() {
        let graph = GraphBuilder::new().finalize();
        assert_eq!(graph.min_ratios, MinRatios::default());
    }

    #[test]
    fn test_adjacency_insertion_order() {
        let mut builder = GraphBuilder::new();
        let a = builder.intern_vertex(coord! {x: 0.0, y: 0.0});
        let b = builder.intern_vertex(coord! {x: 1.0, y: 0.0});
        let c = builder.intern_vertex(coord! {x: 2.0, y: 0.0});
        builder.upsert_edge(edge(a, c, 10.0, 0.1));
        builder.upsert_edge(edge(a, b, 10.0, 0.1));

        let graph = builder.finalize();
        let neighbors: Vec<VertexId> = graph.out_edges_iter(a).map(|(_, v)| v).collect();
        assert_eq!(neighbors, vec![c, b]);
        assert_eq!(graph.edge_between(&a, &b), Some(EdgeId(1)));
        assert_eq!(graph.edge_between(&b, &a), None);
    }
}
