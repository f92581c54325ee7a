use super::VertexId;
use geo::{coord, Coord};
use std::fmt::Display;

/// represents a vertex in a Graph. vertex identity is the exact WGS84
/// coordinate pair of the street intersection; coordinates are `f64` because
/// longitude values in the source data carry seven significant decimals.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Vertex {
    pub vertex_id: VertexId,
    pub coordinate: Coord<f64>,
}

impl Vertex {
    pub fn new(vertex_id: usize, x: f64, y: f64) -> Self {
        Self {
            vertex_id: VertexId(vertex_id),
            coordinate: coord! {x: x, y: y},
        }
    }

    pub fn x(&self) -> f64 {
        self.coordinate.x
    }

    pub fn y(&self) -> f64 {
        self.coordinate.y
    }

    pub fn to_tuple_underlying(&self) -> (f64, f64) {
        (self.coordinate.x, self.coordinate.y)
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vertex {} ({},{})", self.vertex_id, self.x(), self.y())
    }
}
