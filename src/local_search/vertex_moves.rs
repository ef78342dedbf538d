//! Neighbourhoods that add or drop a single Steiner vertex.

use crate::error::SteinerError;
use crate::graph::tree::{induced_tree, trim_steiner_leaves, tree_path};
use crate::graph::{Edge, Vertex};
use crate::random::take_random;
use crate::result::SteinerResult;
use crate::search::{improves, ScoredTree, SearchContext};

use super::delta::TreeDelta;

/// One pass of randomized insertion and deletion.
///
/// Draws outside vertices to insert first and non-terminal tree vertices to
/// delete second, re-spanning the changed vertex set each time. A move is
/// kept when the resulting tree is valid and no heavier; the pass reports
/// whether any kept move was strictly cheaper.
pub(crate) fn insertion_deletion_pass(
    ctx: &mut SearchContext<'_>,
    current: &mut ScoredTree,
    result: &mut SteinerResult,
) -> Result<bool, SteinerError> {
    let mut insertions: Vec<Vertex> = ctx
        .graph
        .vertices()
        .filter(|v| !current.tree.contains_vertex(*v))
        .collect();
    let mut deletions: Vec<Vertex> = current
        .tree
        .vertices()
        .filter(|v| !ctx.terminals.contains(v))
        .collect();

    let mut improved = false;
    loop {
        ctx.check_cancelled()?;
        let mut vertices = current.tree.vertex_set();
        if let Some(vertex) = take_random(&mut insertions, &mut ctx.rng) {
            vertices.insert(vertex);
        } else if let Some(vertex) = take_random(&mut deletions, &mut ctx.rng) {
            vertices.remove(&vertex);
        } else {
            break;
        }

        let candidate = ScoredTree::new(induced_tree(ctx.graph, &vertices, ctx.terminals));
        if improves(current.weight, candidate.weight) || !ctx.is_valid(&candidate.tree) {
            continue;
        }
        if improves(candidate.weight, current.weight) {
            improved = true;
            ctx.offer(result, &candidate);
        }
        *current = candidate;
    }
    Ok(improved)
}

/// One pass of Steiner vertex insertion.
///
/// Each outside vertex adjacent to the tree is attached by its first tree
/// edge; every further tree edge then replaces the heaviest edge on the
/// tree path it closes, if that edge is heavier. The insertion is kept only
/// when it lowers the weight.
pub(crate) fn vertex_insertion_pass(
    ctx: &mut SearchContext<'_>,
    current: &mut ScoredTree,
    result: &mut SteinerResult,
) -> Result<bool, SteinerError> {
    let outside: Vec<Vertex> = ctx
        .graph
        .vertices()
        .filter(|v| !current.tree.contains_vertex(*v))
        .collect();

    let mut improved = false;
    for vertex in outside {
        ctx.check_cancelled()?;
        if current.tree.contains_vertex(vertex) {
            continue;
        }
        let attachments: Vec<Edge> = ctx
            .graph
            .incident_edges(vertex)
            .filter(|e| current.tree.contains_vertex(e.other(vertex)))
            .collect();
        let Some((first, rest)) = attachments.split_first() else {
            continue;
        };

        let tree = &mut current.tree;
        let mut delta = TreeDelta::default();
        delta.add_vertex(tree, vertex);
        delta.add_edge(tree, vertex, first.other(vertex), first.weight);
        for edge in rest {
            let target = edge.other(vertex);
            let Some(path) = tree_path(tree, vertex, target) else {
                continue;
            };
            let mut heaviest: Option<Edge> = None;
            for pair in path.windows(2) {
                let weight = tree.weight(pair[0], pair[1]).unwrap_or(0.0);
                if heaviest.map_or(true, |h| weight > h.weight) {
                    heaviest = Some(Edge::new(pair[0], pair[1], weight));
                }
            }
            if let Some(heaviest) = heaviest.filter(|h| h.weight > edge.weight) {
                delta.remove_edge(tree, heaviest.u, heaviest.v);
                delta.add_edge(tree, vertex, target, edge.weight);
            }
        }

        let weight = tree.total_weight();
        if improves(weight, current.weight) && ctx.is_valid(tree) {
            trim_steiner_leaves(tree, ctx.terminals);
            current.weight = tree.total_weight();
            ctx.offer(result, current);
            improved = true;
        } else {
            delta.revert(tree);
        }
    }
    Ok(improved)
}

/// One pass of Steiner vertex elimination: drops a non-terminal vertex and
/// re-spans the rest whenever that yields a cheaper valid tree.
pub(crate) fn vertex_elimination_pass(
    ctx: &mut SearchContext<'_>,
    current: &mut ScoredTree,
    result: &mut SteinerResult,
) -> Result<bool, SteinerError> {
    let steiner: Vec<Vertex> = current
        .tree
        .vertices()
        .filter(|v| !ctx.terminals.contains(v))
        .collect();

    let mut improved = false;
    for vertex in steiner {
        ctx.check_cancelled()?;
        if !current.tree.contains_vertex(vertex) {
            continue;
        }
        let mut vertices = current.tree.vertex_set();
        vertices.remove(&vertex);
        let candidate = ScoredTree::new(induced_tree(ctx.graph, &vertices, ctx.terminals));
        if improves(candidate.weight, current.weight) && ctx.is_valid(&candidate.tree) {
            ctx.offer(result, &candidate);
            *current = candidate;
            improved = true;
        }
    }
    Ok(improved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::graph::Graph;
    use std::collections::BTreeSet;

    /// Terminals 1, 2, 3 around a cheap hub 0; the outer triangle is pricey.
    fn hub() -> Graph {
        Graph::try_from_edges([
            (1, 2, 3.0),
            (2, 3, 3.0),
            (1, 3, 3.0),
            (0, 1, 1.0),
            (0, 2, 1.0),
            (0, 3, 1.0),
        ])
        .unwrap()
    }

    fn triangle_tree() -> ScoredTree {
        ScoredTree::new(Graph::try_from_edges([(1, 2, 3.0), (2, 3, 3.0)]).unwrap())
    }

    #[test]
    fn test_vertex_insertion_adds_hub() {
        let graph = hub();
        let terminals = BTreeSet::from([1, 2, 3]);
        let mut ctx = SearchContext::new(&graph, &terminals, 1, CancelToken::new());
        let mut result = SteinerResult::new();
        let mut current = triangle_tree();

        let improved = vertex_insertion_pass(&mut ctx, &mut current, &mut result).unwrap();
        assert!(improved);
        assert!(current.tree.contains_vertex(0));
        assert!((current.weight - 3.0).abs() < 1e-12);
        assert!((result.weight() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_insertion_deletion_pass_finds_hub() {
        let graph = hub();
        let terminals = BTreeSet::from([1, 2, 3]);
        let mut ctx = SearchContext::new(&graph, &terminals, 9, CancelToken::new());
        let mut result = SteinerResult::new();
        let mut current = triangle_tree();

        assert!(insertion_deletion_pass(&mut ctx, &mut current, &mut result).unwrap());
        assert!((current.weight - 3.0).abs() < 1e-12);
        assert!(ctx.is_valid(&current.tree));
    }

    #[test]
    fn test_vertex_elimination_drops_useless_detour() {
        // Tree 1-4-5-2 detours through 4 and 5 although 1-2 costs 1.
        let graph = Graph::try_from_edges([(1, 2, 1.0), (1, 4, 1.0), (4, 5, 1.0), (5, 2, 1.0)])
            .unwrap();
        let terminals = BTreeSet::from([1, 2]);
        let mut ctx = SearchContext::new(&graph, &terminals, 1, CancelToken::new());
        let mut result = SteinerResult::new();
        let mut current =
            ScoredTree::new(Graph::try_from_edges([(1, 4, 1.0), (4, 5, 1.0), (5, 2, 1.0)]).unwrap());

        assert!(vertex_elimination_pass(&mut ctx, &mut current, &mut result).unwrap());
        assert_eq!(current.tree.vertex_set(), BTreeSet::from([1, 2]));
        assert!((current.weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_passes_observe_cancellation() {
        let graph = hub();
        let terminals = BTreeSet::from([1, 2, 3]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut ctx = SearchContext::new(&graph, &terminals, 1, cancel);
        let mut result = SteinerResult::new();
        let mut current = triangle_tree();
        let err = insertion_deletion_pass(&mut ctx, &mut current, &mut result).unwrap_err();
        assert!(err.is_cancelled());
        assert!(!result.has_solution());
    }
}
