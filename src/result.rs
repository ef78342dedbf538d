//! Best-so-far holder shared by every algorithm.

use std::fmt;
use std::time::Duration;

use crate::graph::tree::is_steiner_tree;
use crate::graph::{Graph, Terminals};

/// The best Steiner tree an algorithm has produced so far.
///
/// Only validated trees enter through [`SteinerResult::offer`], and a tree
/// is only replaced by one of strictly lower weight, so the held weight
/// never increases during a run.
#[derive(Debug, Clone)]
pub struct SteinerResult {
    tree: Option<Graph>,
    weight: f64,
    runtime: Duration,
    timeout: bool,
}

impl Default for SteinerResult {
    fn default() -> Self {
        Self::new()
    }
}

impl SteinerResult {
    pub fn new() -> Self {
        Self {
            tree: None,
            weight: f64::INFINITY,
            runtime: Duration::ZERO,
            timeout: false,
        }
    }

    /// Stores a copy of `tree` if it weighs strictly less than the held
    /// tree and is a valid Steiner tree of `graph` for `terminals`.
    ///
    /// Returns `true` when the tree was stored.
    pub fn offer(&mut self, graph: &Graph, terminals: &Terminals, tree: &Graph, weight: f64) -> bool {
        let better = weight < self.weight;
        if !better || !is_steiner_tree(graph, terminals, tree) {
            return false;
        }
        self.tree = Some(tree.clone());
        self.weight = weight;
        true
    }

    /// Drops the held tree.
    pub(crate) fn discard(&mut self) {
        self.tree = None;
        self.weight = f64::INFINITY;
    }

    pub(crate) fn set_runtime(&mut self, runtime: Duration) {
        self.runtime = runtime;
    }

    pub(crate) fn set_timeout(&mut self, timeout: bool) {
        self.timeout = timeout;
    }

    pub fn tree(&self) -> Option<&Graph> {
        self.tree.as_ref()
    }

    pub fn into_tree(self) -> Option<Graph> {
        self.tree
    }

    /// Weight of the held tree, `f64::INFINITY` when there is none.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn has_solution(&self) -> bool {
        self.tree.is_some()
    }

    /// Wall-clock time of the run.
    pub fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Whether the run was stopped by its time limit.
    pub fn is_timeout(&self) -> bool {
        self.timeout
    }
}

impl fmt::Display for SteinerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tree {
            Some(tree) => write!(
                f,
                "weight {} ({} vertices, {} edges) in {:?}",
                self.weight,
                tree.vertex_count(),
                tree.edge_count(),
                self.runtime
            )?,
            None => write!(f, "no solution in {:?}", self.runtime)?,
        }
        if self.timeout {
            write!(f, " [timeout]")?;
        }
        Ok(())
    }
}
