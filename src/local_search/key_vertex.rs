//! Key-vertex elimination.

use crate::approx::TwoApproximation;
use crate::error::SteinerError;
use crate::graph::tree::trim_steiner_leaves;
use crate::graph::Vertex;
use crate::result::SteinerResult;
use crate::search::{improves, ScoredTree, SearchContext};

/// One pass of key-vertex elimination.
///
/// For each Steiner vertex of degree three or more, re-approximates a tree
/// spanning all other current vertices and keeps it when it is a cheaper
/// valid tree.
pub(crate) fn key_vertex_elimination_pass(
    ctx: &mut SearchContext<'_>,
    current: &mut ScoredTree,
    result: &mut SteinerResult,
) -> Result<bool, SteinerError> {
    let key_vertices: Vec<Vertex> = current
        .tree
        .vertices()
        .filter(|v| !ctx.terminals.contains(v) && current.tree.degree(*v) >= 3)
        .collect();

    let mut improved = false;
    for vertex in key_vertices {
        ctx.check_cancelled()?;
        if !current.tree.contains_vertex(vertex) {
            continue;
        }
        let mut pinned = current.tree.vertex_set();
        pinned.remove(&vertex);
        let mut tree = TwoApproximation::solve_with_paths(&mut ctx.paths, &pinned, &ctx.cancel)?;
        trim_steiner_leaves(&mut tree, ctx.terminals);
        let candidate = ScoredTree::new(tree);
        if improves(candidate.weight, current.weight) && ctx.is_valid(&candidate.tree) {
            ctx.offer(result, &candidate);
            *current = candidate;
            improved = true;
        }
    }
    Ok(improved)
}
