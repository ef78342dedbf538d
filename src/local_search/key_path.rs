//! Key-path exchange.

use std::collections::BTreeSet;

use crate::error::SteinerError;
use crate::graph::tree::{crucial_vertices, key_paths};
use crate::graph::Vertex;
use crate::result::SteinerResult;
use crate::search::{improves, ScoredTree, SearchContext};

use super::delta::TreeDelta;

/// The part of `path` between its last vertex in `from` and the first
/// following vertex in `to`.
fn connecting_segment(
    path: &[Vertex],
    from: &BTreeSet<Vertex>,
    to: &BTreeSet<Vertex>,
) -> Option<Vec<Vertex>> {
    let start = path.iter().rposition(|v| from.contains(v))?;
    let end = start + path[start..].iter().position(|v| to.contains(v))?;
    Some(path[start..=end].to_vec())
}

/// Tries each key path of the current tree once and applies the first
/// strictly improving exchange.
///
/// The key path is removed, which must split the tree into exactly two
/// subtrees; the cheapest shortest path between them, cut down to the
/// segment from the last vertex of one subtree to the first vertex of the
/// other, reconnects them. Returns whether an exchange was applied.
pub(crate) fn key_path_exchange_step(
    ctx: &mut SearchContext<'_>,
    current: &mut ScoredTree,
    result: &mut SteinerResult,
) -> Result<bool, SteinerError> {
    let crucial = crucial_vertices(&current.tree, ctx.terminals);
    for key_path in key_paths(&current.tree, &crucial) {
        ctx.check_cancelled()?;

        let mut delta = TreeDelta::default();
        let interior = &key_path[1..key_path.len() - 1];
        if interior.is_empty() {
            delta.remove_edge(&mut current.tree, key_path[0], key_path[1]);
        } else {
            for &vertex in interior {
                delta.remove_vertex(&mut current.tree, vertex);
            }
        }

        let components = current.tree.connected_components();
        if components.len() != 2 {
            return Err(SteinerError::InvariantViolation(format!(
                "removing key path {key_path:?} left {} components",
                components.len()
            )));
        }

        let mut best: Option<(f64, Vec<Vertex>)> = None;
        for &a in &components[0] {
            ctx.check_cancelled()?;
            for &b in &components[1] {
                let Some(path) = ctx.paths.path(a, b) else {
                    continue;
                };
                let Some(segment) = connecting_segment(path.vertices(), &components[0], &components[1])
                else {
                    continue;
                };
                let weight: f64 = segment
                    .windows(2)
                    .filter_map(|w| ctx.graph.weight(w[0], w[1]))
                    .sum();
                if best.as_ref().map_or(true, |(w, _)| weight < *w) {
                    best = Some((weight, segment));
                }
            }
        }
        let Some((added, segment)) = best else {
            return Err(SteinerError::InvariantViolation(format!(
                "no path reconnects the subtrees split by key path {key_path:?}"
            )));
        };

        let candidate_weight = current.weight - delta.removed_weight() + added;
        if !improves(candidate_weight, current.weight) {
            delta.revert(&mut current.tree);
            continue;
        }

        for &vertex in &segment {
            delta.add_vertex(&mut current.tree, vertex);
        }
        for pair in segment.windows(2) {
            if let Some(weight) = ctx.graph.weight(pair[0], pair[1]) {
                delta.add_edge(&mut current.tree, pair[0], pair[1], weight);
            }
        }
        if !ctx.is_valid(&current.tree) {
            delta.revert(&mut current.tree);
            continue;
        }
        current.weight = current.tree.total_weight();
        ctx.offer(result, current);
        return Ok(true);
    }
    Ok(false)
}
