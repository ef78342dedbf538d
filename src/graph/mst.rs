//! Kruskal minimum spanning forest.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use super::{Edge, Graph, Vertex};

/// Minimum spanning forest of `graph`.
///
/// Every vertex of `graph` is kept, so a disconnected input yields a forest.
/// Edges are scanned by `(weight, u, v)`, which fixes the result when
/// several spanning trees share the minimum weight.
pub fn minimum_spanning_tree(graph: &Graph) -> Graph {
    let index: HashMap<Vertex, usize> = graph
        .vertices()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();

    let mut edges: Vec<Edge> = graph.edges().collect();
    edges.sort_by(|a, b| {
        a.weight
            .total_cmp(&b.weight)
            .then(a.u.cmp(&b.u))
            .then(a.v.cmp(&b.v))
    });

    let mut forest = Graph::with_capacity(graph.vertex_count(), graph.vertex_count());
    for vertex in graph.vertices() {
        forest.add_vertex(vertex);
    }

    let mut components = UnionFind::<usize>::new(index.len());
    let target = graph.vertex_count().saturating_sub(1);
    for edge in edges {
        if forest.edge_count() == target {
            break;
        }
        let (Some(&a), Some(&b)) = (index.get(&edge.u), index.get(&edge.v)) else {
            continue;
        };
        if components.union(a, b) {
            forest.add_edge(edge.u, edge.v, edge.weight);
        }
    }
    forest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::square;

    #[test]
    fn test_mst_drops_heaviest_cycle_edge() {
        let tree = minimum_spanning_tree(&square());
        assert_eq!(tree.vertex_count(), 4);
        assert_eq!(tree.edge_count(), 3);
        assert!(!tree.contains_edge(1, 4));
        assert!((tree.total_weight() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mst_of_disconnected_graph_is_forest() {
        let graph = Graph::try_from_edges([(1, 2, 2.0), (3, 4, 1.0), (4, 5, 1.0), (3, 5, 1.5)])
            .unwrap();
        let forest = minimum_spanning_tree(&graph);
        assert_eq!(forest.vertex_count(), 5);
        assert_eq!(forest.edge_count(), 3);
        assert_eq!(forest.connected_components().len(), 2);
    }

    #[test]
    fn test_mst_of_empty_graph() {
        let forest = minimum_spanning_tree(&Graph::new());
        assert!(forest.is_empty());
    }
}
