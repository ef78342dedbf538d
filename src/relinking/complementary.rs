//! Complementary-moves relinking.

use std::collections::BTreeSet;

use crate::error::SteinerError;
use crate::graph::tree::induced_tree;
use crate::graph::{Graph, Vertex};
use crate::search::{improves, ScoredTree, SearchContext};

use super::elite::{EliteArchive, EliteSolution};

/// Walks from `initial` towards `guiding` one vertex at a time and returns
/// the best tree met on the way.
///
/// Each step applies, among the remaining vertices of the symmetric
/// difference, the single insertion or removal giving the lightest valid
/// tree. When no remaining move gives a valid tree the last one tried is
/// dropped so the walk always terminates.
fn relink_pair(
    ctx: &SearchContext<'_>,
    initial: &EliteSolution,
    guiding: &EliteSolution,
) -> Result<ScoredTree, SteinerError> {
    let mut remaining: BTreeSet<Vertex> = initial
        .tree
        .vertex_set()
        .symmetric_difference(&guiding.tree.vertex_set())
        .copied()
        .collect();
    let mut current: Graph = initial.tree.clone();
    let mut best = ScoredTree {
        tree: initial.tree.clone(),
        weight: initial.weight,
    };

    while !remaining.is_empty() {
        let mut step: Option<(Vertex, ScoredTree)> = None;
        for &vertex in &remaining {
            ctx.check_cancelled()?;
            let mut vertices = current.vertex_set();
            if !vertices.remove(&vertex) {
                vertices.insert(vertex);
            }
            let candidate = ScoredTree::new(induced_tree(ctx.graph, &vertices, ctx.terminals));
            let lighter = step
                .as_ref()
                .map_or(true, |(_, s)| candidate.weight < s.weight);
            if lighter && ctx.is_valid(&candidate.tree) {
                step = Some((vertex, candidate));
            }
        }
        match step {
            Some((vertex, candidate)) => {
                remaining.remove(&vertex);
                if improves(candidate.weight, best.weight) {
                    best = candidate.clone();
                }
                current = candidate.tree;
            }
            None => {
                remaining.pop_last();
            }
        }
    }
    Ok(best)
}

/// Relinks every `(initial, guiding)` pair and offers the best tree of each
/// trajectory to `next`.
pub(crate) fn complementary(
    ctx: &SearchContext<'_>,
    pairs: &[(&EliteSolution, &EliteSolution)],
    next: &mut EliteArchive,
) -> Result<(), SteinerError> {
    for &(initial, guiding) in pairs {
        ctx.check_cancelled()?;
        let best = relink_pair(ctx, initial, guiding)?;
        next.insert(best.weight, best.tree);
    }
    Ok(())
}
