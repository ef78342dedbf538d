//! Spanning-tree pruning heuristic.

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::trim_steiner_leaves;
use crate::graph::{minimum_spanning_tree, Graph, Terminals};

pub(super) fn construct(
    weighted: &Graph,
    terminals: &Terminals,
    cancel: &CancelToken,
) -> Result<Graph, SteinerError> {
    let mut solution = weighted.clone();
    loop {
        cancel.check()?;
        let mut tree = minimum_spanning_tree(&weighted.induced_subgraph(&solution.vertex_set()));
        let removed = trim_steiner_leaves(&mut tree, terminals);
        solution = tree;
        if removed == 0 {
            return Ok(solution);
        }
    }
}
