//! Bounded archive of the best distinct trees.

use std::collections::BTreeSet;

use crate::graph::{EdgeKey, Graph};

/// A tree held by an [`EliteArchive`].
#[derive(Debug, Clone)]
pub struct EliteSolution {
    pub weight: f64,
    pub tree: Graph,
    edges: BTreeSet<EdgeKey>,
}

impl EliteSolution {
    fn new(weight: f64, tree: Graph) -> Self {
        let edges = tree.edge_keys();
        Self {
            weight,
            tree,
            edges,
        }
    }

    /// Edge set of the tree.
    pub fn edges(&self) -> &BTreeSet<EdgeKey> {
        &self.edges
    }
}

/// At most `capacity` trees with pairwise distinct edge sets, kept sorted
/// by ascending weight.
#[derive(Debug, Clone)]
pub struct EliteArchive {
    capacity: usize,
    entries: Vec<EliteSolution>,
}

impl EliteArchive {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `tree` when there is room or it is strictly lighter than the
    /// worst entry, unless an entry with the same edge set exists. A full
    /// archive evicts its worst entry. Returns whether the tree was kept.
    pub fn insert(&mut self, weight: f64, tree: Graph) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let full = self.entries.len() >= self.capacity;
        if full && self.worst().map_or(true, |w| weight >= w.weight) {
            return false;
        }
        let candidate = EliteSolution::new(weight, tree);
        if self.entries.iter().any(|e| e.edges == candidate.edges) {
            return false;
        }
        if full {
            self.entries.pop();
        }
        let position = self.entries.partition_point(|e| e.weight <= weight);
        self.entries.insert(position, candidate);
        true
    }

    pub fn best(&self) -> Option<&EliteSolution> {
        self.entries.first()
    }

    pub fn worst(&self) -> Option<&EliteSolution> {
        self.entries.last()
    }

    pub fn best_weight(&self) -> Option<f64> {
        self.best().map(|e| e.weight)
    }

    /// Entries by ascending weight.
    pub fn entries(&self) -> &[EliteSolution] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(edges: &[(u32, u32)]) -> Graph {
        Graph::try_from_edges(edges.iter().map(|&(a, b)| (a, b, 1.0))).unwrap()
    }

    #[test]
    fn test_insert_keeps_sorted_and_bounded() {
        let mut archive = EliteArchive::new(2);
        assert!(archive.insert(5.0, path(&[(1, 2)])));
        assert!(archive.insert(3.0, path(&[(1, 3)])));
        assert!(!archive.insert(6.0, path(&[(1, 4)])), "heavier than worst of full archive");
        assert!(!archive.insert(5.0, path(&[(1, 5)])), "ties with worst are rejected");
        assert!(archive.insert(4.0, path(&[(1, 6)])));

        let weights: Vec<f64> = archive.entries().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![3.0, 4.0]);
        assert_eq!(archive.len(), archive.capacity());
    }

    #[test]
    fn test_insert_rejects_duplicate_edge_sets() {
        let mut archive = EliteArchive::new(5);
        assert!(archive.insert(2.0, path(&[(1, 2), (2, 3)])));
        assert!(!archive.insert(2.0, path(&[(3, 2), (2, 1)])));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_equal_weights_keep_insertion_order() {
        let mut archive = EliteArchive::new(3);
        archive.insert(1.0, path(&[(1, 2)]));
        archive.insert(1.0, path(&[(1, 3)]));
        assert!(archive.entries()[0].tree.contains_edge(1, 2));
        assert!(archive.entries()[1].tree.contains_edge(1, 3));
    }

    #[test]
    fn test_zero_capacity() {
        let mut archive = EliteArchive::new(0);
        assert!(!archive.insert(1.0, path(&[(1, 2)])));
        assert!(archive.best().is_none());
    }
}
