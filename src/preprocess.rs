//! Instance reduction hooks.
//!
//! A [`Reduction`] shrinks an instance before the search and returns a
//! backtracking map that turns a tree of the reduced instance into a tree of
//! the original one. [`Reduced`] runs any [`SteinerAlgorithm`] behind a
//! reduction and always reports trees on the original graph.

use std::fmt;

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::execution::SteinerAlgorithm;
use crate::graph::{Graph, Terminals};
use crate::result::SteinerResult;

type Backtrack = Box<dyn Fn(&Graph) -> Result<Graph, SteinerError> + Send + Sync>;

/// A reduced instance together with its way back to the original graph.
pub struct ReducedInstance {
    pub graph: Graph,
    pub terminals: Terminals,
    backtrack: Backtrack,
}

impl ReducedInstance {
    pub fn new<F>(graph: Graph, terminals: Terminals, backtrack: F) -> Self
    where
        F: Fn(&Graph) -> Result<Graph, SteinerError> + Send + Sync + 'static,
    {
        Self {
            graph,
            terminals,
            backtrack: Box::new(backtrack),
        }
    }

    /// Maps a tree of the reduced graph to a tree of the original graph.
    pub fn backtrack(&self, tree: &Graph) -> Result<Graph, SteinerError> {
        (self.backtrack)(tree)
    }
}

impl fmt::Debug for ReducedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducedInstance")
            .field("vertices", &self.graph.vertex_count())
            .field("edges", &self.graph.edge_count())
            .field("terminals", &self.terminals.len())
            .finish_non_exhaustive()
    }
}

/// Shrinks an instance before it is searched.
pub trait Reduction: Sync {
    fn name(&self) -> &str;

    fn reduce(&self, graph: &Graph, terminals: &Terminals) -> Result<ReducedInstance, SteinerError>;
}

/// Leaves the instance untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReduction;

impl Reduction for IdentityReduction {
    fn name(&self) -> &str {
        "identity"
    }

    fn reduce(&self, graph: &Graph, terminals: &Terminals) -> Result<ReducedInstance, SteinerError> {
        Ok(ReducedInstance::new(
            graph.clone(),
            terminals.clone(),
            |tree: &Graph| Ok(tree.clone()),
        ))
    }
}

/// Runs `A` on the instance produced by `R`.
///
/// The best tree of the inner run is backtracked and offered to the outer
/// result even when the inner run was cancelled.
#[derive(Debug, Clone)]
pub struct Reduced<R, A> {
    reduction: R,
    inner: A,
    name: String,
}

impl<R: Reduction, A: SteinerAlgorithm> Reduced<R, A> {
    pub fn new(reduction: R, inner: A) -> Self {
        let name = format!("{}+{}", reduction.name(), inner.name());
        Self {
            reduction,
            inner,
            name,
        }
    }

    pub fn reduction(&self) -> &R {
        &self.reduction
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<R: Reduction, A: SteinerAlgorithm> SteinerAlgorithm for Reduced<R, A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run_instance(
        &self,
        graph: &Graph,
        terminals: &Terminals,
        result: &mut SteinerResult,
        cancel: &CancelToken,
    ) -> Result<(), SteinerError> {
        let instance = self.reduction.reduce(graph, terminals)?;
        debug!(
            reduction = self.reduction.name(),
            vertices = instance.graph.vertex_count(),
            edges = instance.graph.edge_count(),
            "instance reduced"
        );

        let mut reduced = SteinerResult::new();
        let outcome =
            self.inner
                .run_instance(&instance.graph, &instance.terminals, &mut reduced, cancel);

        if let Some(tree) = reduced.tree() {
            let tree = instance.backtrack(tree)?;
            let weight = tree.total_weight();
            if !result.offer(graph, terminals, &tree, weight) {
                warn!(weight, "backtracked tree was rejected");
            }
        }
        outcome
    }
}
