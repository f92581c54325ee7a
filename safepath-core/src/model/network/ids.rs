use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// declares a dense integer id newtype for the graph. ids are assigned
/// consecutively from zero at build time and index directly into the boxed
/// slices of [`super::Graph`], so every id kind is the same `usize` wrapper
/// with value semantics, a stable ordering, and hashing for use as a
/// frontier or visited-set key.
macro_rules! graph_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Debug, Default)]
        pub struct $name(pub usize);

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $name {
            pub fn as_usize(&self) -> usize {
                self.0
            }
        }
    };
}

graph_id!(
    /// identifies a vertex (street intersection) interned from its exact
    /// coordinate pair
    VertexId
);

graph_id!(
    /// identifies a directed edge (street segment) and its geometry row
    EdgeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_order_by_index() {
        assert!(VertexId(2) < VertexId(10));
        assert!(EdgeId(0) < EdgeId(1));
        assert_eq!(VertexId(7).as_usize(), 7);
        assert_eq!(format!("{}", EdgeId(42)), "42");
    }
}
