use super::{Edge, EdgeId, Graph, GraphBuilder};
use crate::model::dataset::EdgeRow;
use crate::model::map::GeometryModel;
use geo::{LineString, Rect};

/// builds the street graph and its edge geometry table from validated
/// dataset rows.
///
/// vertices are interned by exact coordinate pair in first-seen order. a
/// repeated `(origin, destination)` pair overwrites both the edge record and
/// its geometry in place (last write wins), so graph and geometry stay
/// aligned by `EdgeId`.
pub fn graph_from_rows(rows: Vec<EdgeRow>) -> (Graph, GeometryModel) {
    let mut builder = GraphBuilder::new();
    let mut geometries: Vec<LineString<f64>> = Vec::with_capacity(rows.len());
    let mut bboxes: Vec<Rect<f64>> = Vec::with_capacity(rows.len());

    for row in rows {
        let src_vertex_id = builder.intern_vertex(row.origin);
        let dst_vertex_id = builder.intern_vertex(row.destination);
        let edge_id = builder.upsert_edge(Edge {
            edge_id: EdgeId::default(),
            src_vertex_id,
            dst_vertex_id,
            name: row.name,
            length_m: row.length_m,
            oneway: row.oneway,
            harassment_risk: row.harassment_risk,
            cameras_count: row.cameras_count,
            incidents_count: row.incidents_count,
            incidents_severity: row.incidents_severity,
            risk_score: row.risk_score,
            combined_cost: row.combined_cost,
        });

        if edge_id.0 == geometries.len() {
            geometries.push(row.geometry);
            bboxes.push(row.bbox);
        } else {
            geometries[edge_id.0] = row.geometry;
            bboxes[edge_id.0] = row.bbox;
        }
    }

    let graph = builder.finalize();
    log::info!(
        "graph built: {} vertices, {} edges",
        graph.n_vertices(),
        graph.n_edges()
    );

    (graph, GeometryModel::new(geometries, bboxes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::read_edge_rows;
    use std::path::PathBuf;

    #[test]
    fn test_graph_from_fixture_rows() {
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("model")
            .join("dataset")
            .join("test")
            .join("edges.csv");
        let result = read_edge_rows(fixture).unwrap();
        let (graph, geometry) = graph_from_rows(result.rows);

        // 8 distinct intersections, 10 directed segments, geometry aligned
        assert_eq!(graph.n_vertices(), 8);
        assert_eq!(graph.n_edges(), 10);
        assert_eq!(geometry.n_edges(), 10);

        // every edge endpoint is a registered vertex
        for edge in graph.edges.iter() {
            assert!(graph.get_vertex(&edge.src_vertex_id).is_ok());
            assert!(graph.get_vertex(&edge.dst_vertex_id).is_ok());
        }
    }
}
