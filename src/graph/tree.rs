//! Tree utilities: validation, leaf trimming and key-path decomposition.

use std::collections::BTreeSet;

use super::{minimum_spanning_tree, Graph, ShortestPaths, Terminals, Vertex};

/// Repeatedly removes non-terminal vertices of degree below two.
///
/// Returns the number of removed vertices. Running it twice removes
/// nothing the second time.
pub fn trim_steiner_leaves(tree: &mut Graph, terminals: &Terminals) -> usize {
    let mut worklist: Vec<Vertex> = tree
        .vertices()
        .filter(|v| !terminals.contains(v) && tree.degree(*v) < 2)
        .collect();
    let mut removed = 0;
    while let Some(vertex) = worklist.pop() {
        if !tree.contains_vertex(vertex) || tree.degree(vertex) >= 2 {
            continue;
        }
        let neighbors: Vec<Vertex> = tree.neighbors(vertex).collect();
        tree.remove_vertex(vertex);
        removed += 1;
        worklist.extend(neighbors.into_iter().filter(|n| !terminals.contains(n)));
    }
    removed
}

/// MST of the subgraph of `graph` induced by `vertices`, trimmed of
/// non-terminal leaves.
pub fn induced_tree(graph: &Graph, vertices: &BTreeSet<Vertex>, terminals: &Terminals) -> Graph {
    let mut tree = minimum_spanning_tree(&graph.induced_subgraph(vertices));
    trim_steiner_leaves(&mut tree, terminals);
    tree
}

/// Whether `tree` is a Steiner tree of `graph` for `terminals`: a connected,
/// acyclic subgraph of `graph`, with matching edge weights, that contains
/// every terminal.
pub fn is_steiner_tree(graph: &Graph, terminals: &Terminals, tree: &Graph) -> bool {
    if terminals.iter().any(|t| !tree.contains_vertex(*t)) {
        return false;
    }
    if tree.vertices().any(|v| !graph.contains_vertex(v)) {
        return false;
    }
    let weights_match = tree
        .edges()
        .all(|e| graph.weight(e.u, e.v).is_some_and(|w| w == e.weight));
    if !weights_match {
        return false;
    }
    if tree.is_empty() {
        return true;
    }
    tree.edge_count() + 1 == tree.vertex_count() && tree.is_connected()
}

/// Whether no non-terminal vertex of `tree` is a leaf.
pub fn is_trimmed(tree: &Graph, terminals: &Terminals) -> bool {
    tree.vertices()
        .all(|v| terminals.contains(&v) || tree.degree(v) >= 2)
}

/// Whether `a` and `b` have exactly the same edge set.
pub fn same_edges(a: &Graph, b: &Graph) -> bool {
    a.edge_count() == b.edge_count() && a.edges().all(|e| b.contains_edge(e.u, e.v))
}

/// Terminals of the tree plus every vertex of degree three or more.
pub fn crucial_vertices(tree: &Graph, terminals: &Terminals) -> BTreeSet<Vertex> {
    tree.vertices()
        .filter(|v| terminals.contains(v) || tree.degree(*v) >= 3)
        .collect()
}

/// Maximal paths of `tree` whose endpoints are crucial and whose interior
/// vertices are not.
///
/// Each path is reported once, oriented from its smaller endpoint.
pub fn key_paths(tree: &Graph, crucial: &BTreeSet<Vertex>) -> Vec<Vec<Vertex>> {
    let mut paths = Vec::new();
    for &start in crucial {
        for first in tree.neighbors(start) {
            let mut path = vec![start, first];
            let mut previous = start;
            let mut current = first;
            let mut complete = true;
            while !crucial.contains(&current) {
                match tree.neighbors(current).find(|n| *n != previous) {
                    Some(next) => {
                        previous = current;
                        current = next;
                        path.push(next);
                    }
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete && start < current {
                paths.push(path);
            }
        }
    }
    paths
}

/// The unique path between `from` and `to` inside `tree`.
pub fn tree_path(tree: &Graph, from: Vertex, to: Vertex) -> Option<Vec<Vertex>> {
    ShortestPaths::new(tree)
        .path(from, to)
        .map(|p| p.vertices().to_vec())
}
