//! Core routing engine for SafePath: a safety-aware street network router.
//!
//! The crate is organized in three layers:
//! - [`model`] holds the street network graph, the unified edge dataset
//!   loader, and the spatial indexes used for snapping and corridor
//!   extraction,
//! - [`algorithm`] holds the shortest-path core (Dijkstra, A*, Bellman-Ford)
//!   and the heuristic search variants (greedy, backtracking,
//!   branch-and-bound, k-shortest paths),
//! - [`util`] holds the shared geographic helpers.
//!
//! Everything in [`model`] is immutable once built and safe to share across
//! concurrent queries; per-query state lives entirely on the call stack.

pub mod algorithm;
pub mod model;
pub mod util;
