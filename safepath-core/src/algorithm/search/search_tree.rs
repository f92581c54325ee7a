use super::SearchError;
use crate::model::network::{EdgeId, VertexId};
use std::collections::{HashMap, HashSet};

/// one branch of a shortest-path tree: the predecessor vertex from which
/// the keyed vertex was reached, and the edge that was traversed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchTreeBranch {
    pub terminal_vertex: VertexId,
    pub edge_id: EdgeId,
    pub edge_cost: f64,
}

/// reconstructs the vertex path for some source and target from a
/// predecessor tree, walking from the target up toward the root.
pub fn vertex_oriented_route(
    source_id: VertexId,
    target_id: VertexId,
    tree: &HashMap<VertexId, SearchTreeBranch>,
) -> Result<Vec<VertexId>, SearchError> {
    let mut result: Vec<VertexId> = vec![target_id];
    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut this_vertex = target_id;
    while this_vertex != source_id {
        let first_visit = visited.insert(this_vertex);
        if !first_visit {
            return Err(SearchError::InternalError(format!(
                "loop in search result at vertex {}",
                this_vertex
            )));
        }
        let branch = tree
            .get(&this_vertex)
            .ok_or(SearchError::VertexMissingFromSearchTree(this_vertex))?;
        this_vertex = branch.terminal_vertex;
        result.push(this_vertex);
    }
    result.reverse();
    Ok(result)
}
