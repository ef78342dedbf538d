//! Weighted undirected graphs and the primitives the heuristics consume.
//!
//! [`Graph`] is used both for problem instances and for candidate Steiner
//! trees: a tree is simply a graph whose edges are a subset of the
//! instance's edges. Vertex and edge iteration order depends only on the
//! sequence of insertions and removals, so a search is reproducible for a
//! fixed seed.

pub mod mst;
pub mod paths;
pub mod tree;

use std::collections::{BTreeSet, HashMap};

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::error::SteinerError;

pub use mst::minimum_spanning_tree;
pub use paths::{Path, ShortestPaths};

/// Vertex identifier.
pub type Vertex = u32;

/// Vertices every feasible solution must contain.
pub type Terminals = BTreeSet<Vertex>;

/// Endpoint pair of an undirected edge, stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey(Vertex, Vertex);

impl EdgeKey {
    pub fn new(a: Vertex, b: Vertex) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn endpoints(&self) -> (Vertex, Vertex) {
        (self.0, self.1)
    }
}

/// A weighted undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub u: Vertex,
    pub v: Vertex,
    pub weight: f64,
}

impl Edge {
    /// Creates an edge with its endpoints normalized (`u <= v`).
    pub fn new(a: Vertex, b: Vertex, weight: f64) -> Self {
        let key = EdgeKey::new(a, b);
        Self {
            u: key.0,
            v: key.1,
            weight,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey(self.u, self.v)
    }

    /// The endpoint opposite to `vertex`.
    pub fn other(&self, vertex: Vertex) -> Vertex {
        if self.u == vertex {
            self.v
        } else {
            self.u
        }
    }
}

/// Edge weights kept apart from a graph's own baseline weights.
///
/// Used to bias the construction heuristics without touching the
/// true-cost graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightMap {
    weights: HashMap<EdgeKey, f64>,
}

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the baseline weights of `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            weights: graph.edges().map(|e| (e.key(), e.weight)).collect(),
        }
    }

    pub fn get(&self, key: EdgeKey) -> Option<f64> {
        self.weights.get(&key).copied()
    }

    pub fn set(&mut self, key: EdgeKey, weight: f64) {
        self.weights.insert(key, weight);
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Undirected simple graph with non-negative `f64` edge weights.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: UnGraphMap<Vertex, f64>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            inner: UnGraphMap::new(),
        }
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            inner: UnGraphMap::with_capacity(vertices, edges),
        }
    }

    /// Builds a graph from `(u, v, weight)` triples, rejecting self loops,
    /// parallel edges and weights that are negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use steiner_grasp::graph::Graph;
    ///
    /// let graph = Graph::try_from_edges([(1, 2, 1.0), (2, 3, 1.0)]).unwrap();
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert!(Graph::try_from_edges([(1, 1, 1.0)]).is_err());
    /// ```
    pub fn try_from_edges<I>(edges: I) -> Result<Self, SteinerError>
    where
        I: IntoIterator<Item = (Vertex, Vertex, f64)>,
    {
        let mut graph = Self::new();
        for (u, v, weight) in edges {
            if u == v {
                return Err(SteinerError::InvalidGraph(format!("self loop on vertex {u}")));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(SteinerError::InvalidGraph(format!(
                    "edge {u}-{v} has invalid weight {weight}"
                )));
            }
            if graph.contains_edge(u, v) {
                return Err(SteinerError::InvalidGraph(format!("parallel edge {u}-{v}")));
            }
            graph.add_edge(u, v, weight);
        }
        Ok(graph)
    }

    /// Checks that every terminal is a vertex of this graph.
    pub fn check_terminals(&self, terminals: &Terminals) -> Result<(), SteinerError> {
        match terminals.iter().find(|t| !self.contains_vertex(**t)) {
            Some(t) => Err(SteinerError::InvalidGraph(format!(
                "terminal {t} is not a vertex of the graph"
            ))),
            None => Ok(()),
        }
    }

    /// Adds `vertex`, returning `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        if self.inner.contains_node(vertex) {
            return false;
        }
        self.inner.add_node(vertex);
        true
    }

    /// Adds or updates an edge, inserting missing endpoints.
    /// Returns the previous weight if the edge existed.
    pub fn add_edge(&mut self, a: Vertex, b: Vertex, weight: f64) -> Option<f64> {
        debug_assert!(a != b, "self loop on vertex {a}");
        self.inner.add_edge(a, b, weight)
    }

    /// Removes `vertex` and its incident edges.
    pub fn remove_vertex(&mut self, vertex: Vertex) -> bool {
        self.inner.remove_node(vertex)
    }

    pub fn remove_edge(&mut self, a: Vertex, b: Vertex) -> Option<f64> {
        self.inner.remove_edge(a, b)
    }

    pub fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.inner.contains_node(vertex)
    }

    pub fn contains_edge(&self, a: Vertex, b: Vertex) -> bool {
        self.inner.contains_edge(a, b)
    }

    pub fn weight(&self, a: Vertex, b: Vertex) -> Option<f64> {
        self.inner.edge_weight(a, b).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.inner.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.inner
            .all_edges()
            .map(|(a, b, &weight)| Edge::new(a, b, weight))
    }

    pub fn neighbors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.inner.neighbors(vertex)
    }

    /// Neighbours of `vertex` together with the connecting edge weight.
    pub fn weighted_neighbors(&self, vertex: Vertex) -> impl Iterator<Item = (Vertex, f64)> + '_ {
        self.inner
            .edges(vertex)
            .map(move |(a, b, &weight)| (if a == vertex { b } else { a }, weight))
    }

    pub fn incident_edges(&self, vertex: Vertex) -> impl Iterator<Item = Edge> + '_ {
        self.inner
            .edges(vertex)
            .map(|(a, b, &weight)| Edge::new(a, b, weight))
    }

    pub fn degree(&self, vertex: Vertex) -> usize {
        self.inner.neighbors(vertex).count()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.inner.all_edges().map(|(_, _, w)| *w).sum()
    }

    pub fn vertex_set(&self) -> BTreeSet<Vertex> {
        self.inner.nodes().collect()
    }

    pub fn edge_keys(&self) -> BTreeSet<EdgeKey> {
        self.edges().map(|e| e.key()).collect()
    }

    /// Subgraph induced by the vertices of `keep` that belong to this graph.
    pub fn induced_subgraph(&self, keep: &BTreeSet<Vertex>) -> Graph {
        let mut sub = Graph::with_capacity(keep.len(), keep.len());
        for vertex in self.vertices().filter(|v| keep.contains(v)) {
            sub.add_vertex(vertex);
        }
        for edge in self
            .edges()
            .filter(|e| keep.contains(&e.u) && keep.contains(&e.v))
        {
            sub.add_edge(edge.u, edge.v, edge.weight);
        }
        sub
    }

    /// Copy of this graph carrying the weights of `weights` where present.
    pub fn with_weights(&self, weights: &WeightMap) -> Graph {
        let mut copy = Graph::with_capacity(self.vertex_count(), self.edge_count());
        for vertex in self.vertices() {
            copy.add_vertex(vertex);
        }
        for edge in self.edges() {
            let weight = weights.get(edge.key()).unwrap_or(edge.weight);
            copy.add_edge(edge.u, edge.v, weight);
        }
        copy
    }

    /// Replaces every edge weight with the weight the same endpoint pair
    /// has in `base`.
    pub fn reweight_from(&mut self, base: &Graph) -> Result<(), SteinerError> {
        let keys: Vec<EdgeKey> = self.edges().map(|e| e.key()).collect();
        for key in keys {
            let (a, b) = key.endpoints();
            let weight = base.weight(a, b).ok_or_else(|| {
                SteinerError::InvariantViolation(format!("edge {a}-{b} is not part of the graph"))
            })?;
            self.add_edge(a, b, weight);
        }
        Ok(())
    }

    /// Partition of the vertices into connected components, in order of
    /// each component's first vertex.
    pub fn connected_components(&self) -> Vec<BTreeSet<Vertex>> {
        let mut seen: BTreeSet<Vertex> = BTreeSet::new();
        let mut components = Vec::new();
        for start in self.vertices() {
            if seen.contains(&start) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut bfs = Bfs::new(&self.inner, start);
            while let Some(vertex) = bfs.next(&self.inner) {
                component.insert(vertex);
            }
            seen.extend(component.iter().copied());
            components.push(component);
        }
        components
    }

    /// Whether the graph has at most one connected component.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.vertices().next() else {
            return true;
        };
        let mut bfs = Bfs::new(&self.inner, start);
        let mut reached = 0;
        while bfs.next(&self.inner).is_some() {
            reached += 1;
        }
        reached == self.vertex_count()
    }

    /// Whether all `vertices` lie in one connected component.
    pub fn connects(&self, vertices: &BTreeSet<Vertex>) -> bool {
        let Some(&start) = vertices.iter().next() else {
            return true;
        };
        if !self.contains_vertex(start) {
            return false;
        }
        let mut bfs = Bfs::new(&self.inner, start);
        let mut reached = 0;
        while let Some(vertex) = bfs.next(&self.inner) {
            if vertices.contains(&vertex) {
                reached += 1;
            }
        }
        reached == vertices.len()
    }
}
