//! Shortest-path growth heuristic.

use std::collections::BTreeSet;

use rand::Rng;

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::induced_tree;
use crate::graph::{Graph, ShortestPaths, Terminals, Vertex};
use crate::random;

pub(super) fn construct<R: Rng>(
    weighted: &Graph,
    terminals: &Terminals,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<Graph, SteinerError> {
    let members: Vec<Vertex> = terminals
        .iter()
        .copied()
        .filter(|t| weighted.contains_vertex(*t))
        .collect();
    let Some(&root) = random::pick(&members, rng) else {
        return Ok(Graph::new());
    };

    let mut paths = ShortestPaths::new(weighted);
    let mut solution = Graph::new();
    solution.add_vertex(root);
    let mut pending: BTreeSet<Vertex> = members.into_iter().filter(|t| *t != root).collect();

    while !pending.is_empty() {
        cancel.check()?;
        let mut closest: Option<(f64, Vertex, Vertex)> = None;
        for &terminal in &pending {
            cancel.check()?;
            for attached in solution.vertices() {
                let distance = paths.distance(terminal, attached);
                if distance.is_finite() && closest.map_or(true, |(best, _, _)| distance < best) {
                    closest = Some((distance, terminal, attached));
                }
            }
        }
        // Remaining terminals are unreachable from the partial tree.
        let Some((_, terminal, attached)) = closest else {
            break;
        };
        let path = paths.path(terminal, attached).ok_or_else(|| {
            SteinerError::InvariantViolation(format!("no path from {terminal} to {attached}"))
        })?;
        for &vertex in path.vertices() {
            solution.add_vertex(vertex);
            pending.remove(&vertex);
        }
        for key in path.edges() {
            let (a, b) = key.endpoints();
            if let Some(weight) = weighted.weight(a, b) {
                solution.add_edge(a, b, weight);
            }
        }
    }

    Ok(induced_tree(weighted, &solution.vertex_set(), terminals))
}
