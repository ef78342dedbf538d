//! Metric closure restricted to a vertex subset.

use std::collections::HashMap;

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::{EdgeKey, Graph, Path, ShortestPaths, Terminals};

/// Complete graph over the reachable pairs of a vertex subset, weighted by
/// shortest-path distance, with the realizing path kept per pair.
#[derive(Debug, Clone)]
pub struct MetricClosure {
    graph: Graph,
    paths: HashMap<EdgeKey, Path>,
}

impl MetricClosure {
    /// Builds the closure over the members of `vertices` present in the
    /// oracle's graph. Unreachable pairs get no edge.
    pub fn build(
        paths: &mut ShortestPaths<'_>,
        vertices: &Terminals,
        cancel: &CancelToken,
    ) -> Result<Self, SteinerError> {
        let base = paths.graph();
        let members: Vec<_> = vertices
            .iter()
            .copied()
            .filter(|v| base.contains_vertex(*v))
            .collect();

        let mut graph = Graph::with_capacity(members.len(), members.len() * members.len() / 2);
        let mut realized = HashMap::new();
        for &vertex in &members {
            graph.add_vertex(vertex);
        }
        for (i, &source) in members.iter().enumerate() {
            cancel.check()?;
            for &target in &members[i + 1..] {
                if let Some(path) = paths.path(source, target) {
                    graph.add_edge(source, target, path.weight());
                    realized.insert(EdgeKey::new(source, target), path);
                }
            }
        }
        Ok(Self {
            graph,
            paths: realized,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Shortest path realizing the closure edge `key`.
    pub fn path(&self, key: EdgeKey) -> Option<&Path> {
        self.paths.get(&key)
    }
}
