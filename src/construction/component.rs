//! Kruskal-style component merging heuristic.

use std::collections::BTreeSet;

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::induced_tree;
use crate::graph::{Graph, Path, ShortestPaths, Terminals, Vertex};

pub(super) fn construct(
    weighted: &Graph,
    terminals: &Terminals,
    cancel: &CancelToken,
) -> Result<Graph, SteinerError> {
    let mut paths = ShortestPaths::new(weighted);
    let mut chosen: BTreeSet<Vertex> = BTreeSet::new();
    let mut components: Vec<BTreeSet<Vertex>> = terminals
        .iter()
        .filter(|t| weighted.contains_vertex(**t))
        .map(|t| {
            chosen.insert(*t);
            BTreeSet::from([*t])
        })
        .collect();

    while components.len() > 1 {
        cancel.check()?;
        let mut cheapest: Option<(usize, usize, Path)> = None;
        for i in 0..components.len() {
            cancel.check()?;
            for j in i + 1..components.len() {
                for &a in &components[i] {
                    for &b in &components[j] {
                        let distance = paths.distance(a, b);
                        let better = cheapest
                            .as_ref()
                            .map_or(true, |(_, _, best)| distance < best.weight());
                        if distance.is_finite() && better {
                            if let Some(path) = paths.path(a, b) {
                                cheapest = Some((i, j, path));
                            }
                        }
                    }
                }
            }
        }
        // Leftover components cannot reach each other.
        let Some((i, j, path)) = cheapest else {
            break;
        };
        let merged = components.swap_remove(j);
        components[i].extend(merged);
        components[i].extend(path.vertices().iter().copied());
        chosen.extend(path.vertices().iter().copied());
    }

    Ok(induced_tree(weighted, &chosen, terminals))
}
