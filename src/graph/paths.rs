//! Single-source shortest paths with a lazily filled per-source cache.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use super::{EdgeKey, Graph, Vertex};

/// A shortest path between two vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    vertices: Vec<Vertex>,
    weight: f64,
}

impl Path {
    /// Vertices from source to target, both included.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Consecutive vertex pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.vertices.windows(2).map(|w| EdgeKey::new(w[0], w[1]))
    }
}

#[derive(Debug, Default)]
struct SourceTree {
    dist: HashMap<Vertex, f64>,
    parent: HashMap<Vertex, Vertex>,
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first,
/// breaking ties by the smaller vertex id.
#[derive(Debug, PartialEq)]
struct Candidate {
    cost: f64,
    vertex: Vertex,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(graph: &Graph, source: Vertex) -> SourceTree {
    let mut tree = SourceTree::default();
    if !graph.contains_vertex(source) {
        return tree;
    }

    let mut heap = BinaryHeap::new();
    tree.dist.insert(source, 0.0);
    heap.push(Candidate {
        cost: 0.0,
        vertex: source,
    });

    while let Some(Candidate { cost, vertex }) = heap.pop() {
        if tree.dist.get(&vertex).is_some_and(|&d| cost > d) {
            continue;
        }
        for (next, weight) in graph.weighted_neighbors(vertex) {
            let alt = cost + weight;
            let better = tree.dist.get(&next).map_or(true, |&d| alt < d);
            if better {
                tree.dist.insert(next, alt);
                tree.parent.insert(next, vertex);
                heap.push(Candidate {
                    cost: alt,
                    vertex: next,
                });
            }
        }
    }
    tree
}

/// Shortest-path oracle over one graph.
///
/// Each source is solved once with Dijkstra and kept for the lifetime of the
/// oracle, so repeated queries from the same vertex are lookups.
#[derive(Debug)]
pub struct ShortestPaths<'g> {
    graph: &'g Graph,
    trees: HashMap<Vertex, SourceTree>,
}

impl<'g> ShortestPaths<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            trees: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    fn tree(&mut self, source: Vertex) -> &SourceTree {
        let graph = self.graph;
        match self.trees.entry(source) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(dijkstra(graph, source)),
        }
    }

    /// Distance from `source` to `target`, `f64::INFINITY` when unreachable.
    pub fn distance(&mut self, source: Vertex, target: Vertex) -> f64 {
        self.tree(source)
            .dist
            .get(&target)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Cheapest path from `source` to `target`, `None` when unreachable.
    pub fn path(&mut self, source: Vertex, target: Vertex) -> Option<Path> {
        let tree = self.tree(source);
        let weight = *tree.dist.get(&target)?;
        let mut vertices = vec![target];
        let mut cursor = target;
        while cursor != source {
            cursor = *tree.parent.get(&cursor)?;
            vertices.push(cursor);
        }
        vertices.reverse();
        Some(Path { vertices, weight })
    }

    /// Number of sources solved so far.
    pub fn cached_sources(&self) -> usize {
        self.trees.len()
    }
}
