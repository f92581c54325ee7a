use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// the routing algorithms exposed by the query facade.
///
/// the standard algorithms run over the corridor subgraph first and fall
/// back to the full graph; the heuristic variants run directly on the full
/// graph and fall back to Dijkstra when they fail to produce a route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Dijkstra,
    Astar,
    BellmanFord,
    Greedy,
    Backtracking,
    BranchAndBound,
    KShortest,
}

impl Algorithm {
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
            Algorithm::BellmanFord => "bellman_ford",
            Algorithm::Greedy => "greedy",
            Algorithm::Backtracking => "backtracking",
            Algorithm::BranchAndBound => "branch_and_bound",
            Algorithm::KShortest => "k_shortest",
        }
    }

    /// standard shortest-path algorithms take the corridor-then-full-graph
    /// route through the facade
    pub fn is_standard(&self) -> bool {
        matches!(
            self,
            Algorithm::Dijkstra | Algorithm::Astar | Algorithm::BellmanFord
        )
    }

    /// heuristic variants run on the full graph and earn a Dijkstra
    /// fallback when they come back empty-handed
    pub fn is_heuristic_variant(&self) -> bool {
        matches!(
            self,
            Algorithm::Greedy | Algorithm::Backtracking | Algorithm::BranchAndBound
        )
    }

    pub fn all() -> [Algorithm; 7] {
        [
            Algorithm::Dijkstra,
            Algorithm::Astar,
            Algorithm::BellmanFord,
            Algorithm::Greedy,
            Algorithm::Backtracking,
            Algorithm::BranchAndBound,
            Algorithm::KShortest,
        ]
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a_star" => Ok(Algorithm::Astar),
            "bellman_ford" => Ok(Algorithm::BellmanFord),
            "greedy" => Ok(Algorithm::Greedy),
            "backtracking" => Ok(Algorithm::Backtracking),
            "branch_and_bound" => Ok(Algorithm::BranchAndBound),
            "k_shortest" | "k_shortest_paths" => Ok(Algorithm::KShortest),
            other => Err(format!("unknown algorithm '{}'", other)),
        }
    }
}
