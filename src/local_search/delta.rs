//! Reversible edits to a tree.

use crate::graph::{Edge, Graph, Vertex};

/// Records the edits applied to a tree so a rejected move can be undone
/// exactly.
#[derive(Debug, Default)]
pub(crate) struct TreeDelta {
    removed_vertices: Vec<Vertex>,
    removed_edges: Vec<Edge>,
    added_vertices: Vec<Vertex>,
    added_edges: Vec<Edge>,
}

impl TreeDelta {
    /// Removes `vertex` together with its incident edges.
    pub(crate) fn remove_vertex(&mut self, tree: &mut Graph, vertex: Vertex) {
        let incident: Vec<Edge> = tree.incident_edges(vertex).collect();
        if tree.remove_vertex(vertex) {
            self.removed_edges.extend(incident);
            self.removed_vertices.push(vertex);
        }
    }

    pub(crate) fn remove_edge(&mut self, tree: &mut Graph, a: Vertex, b: Vertex) {
        if let Some(weight) = tree.remove_edge(a, b) {
            self.removed_edges.push(Edge::new(a, b, weight));
        }
    }

    pub(crate) fn add_vertex(&mut self, tree: &mut Graph, vertex: Vertex) {
        if tree.add_vertex(vertex) {
            self.added_vertices.push(vertex);
        }
    }

    /// Adds an edge whose endpoints are already in `tree`.
    pub(crate) fn add_edge(&mut self, tree: &mut Graph, a: Vertex, b: Vertex, weight: f64) {
        if !tree.contains_edge(a, b) {
            tree.add_edge(a, b, weight);
            self.added_edges.push(Edge::new(a, b, weight));
        }
    }

    /// Total weight of the removed edges.
    pub(crate) fn removed_weight(&self) -> f64 {
        self.removed_edges.iter().map(|e| e.weight).sum()
    }

    /// Undoes every recorded edit.
    pub(crate) fn revert(self, tree: &mut Graph) {
        for edge in self.added_edges.iter().rev() {
            tree.remove_edge(edge.u, edge.v);
        }
        for &vertex in self.added_vertices.iter().rev() {
            tree.remove_vertex(vertex);
        }
        for &vertex in &self.removed_vertices {
            tree.add_vertex(vertex);
        }
        for edge in &self.removed_edges {
            tree.add_edge(edge.u, edge.v, edge.weight);
        }
    }
}
