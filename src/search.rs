//! State shared by the heuristics of one search.

use rand::rngs::StdRng;

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::is_steiner_tree;
use crate::graph::{Graph, ShortestPaths, Terminals};
use crate::random::create_rng;
use crate::result::SteinerResult;

/// Relative tolerance below which two tree weights count as equal.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Whether `candidate` is strictly cheaper than `incumbent`, ignoring
/// differences caused by summation order.
///
/// The tolerance scales with `incumbent` only, so instances with tiny
/// weights still improve.
pub(crate) fn improves(candidate: f64, incumbent: f64) -> bool {
    if !incumbent.is_finite() {
        return candidate < incumbent;
    }
    candidate < incumbent - WEIGHT_TOLERANCE * incumbent.abs()
}

/// A tree paired with its true weight.
#[derive(Debug, Clone)]
pub struct ScoredTree {
    pub tree: Graph,
    pub weight: f64,
}

impl ScoredTree {
    /// Scores `tree` by its own edge weights.
    pub fn new(tree: Graph) -> Self {
        let weight = tree.total_weight();
        Self { tree, weight }
    }
}

/// Instance, shortest-path cache, generator and cancellation token for a
/// single search.
///
/// The shortest-path cache is built on the true-weight graph and never on a
/// perturbed copy.
#[derive(Debug)]
pub struct SearchContext<'g> {
    pub(crate) graph: &'g Graph,
    pub(crate) terminals: &'g Terminals,
    pub(crate) paths: ShortestPaths<'g>,
    pub(crate) rng: StdRng,
    pub(crate) cancel: CancelToken,
}

impl<'g> SearchContext<'g> {
    pub fn new(graph: &'g Graph, terminals: &'g Terminals, seed: u64, cancel: CancelToken) -> Self {
        Self {
            graph,
            terminals,
            paths: ShortestPaths::new(graph),
            rng: create_rng(seed),
            cancel,
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn terminals(&self) -> &'g Terminals {
        self.terminals
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), SteinerError> {
        self.cancel.check()
    }

    /// Whether all terminals lie in one component of the graph.
    pub fn is_feasible(&self) -> bool {
        self.graph.connects(self.terminals)
    }

    pub fn is_valid(&self, tree: &Graph) -> bool {
        is_steiner_tree(self.graph, self.terminals, tree)
    }

    /// Offers a scored tree to `result`.
    pub(crate) fn offer(&self, result: &mut SteinerResult, candidate: &ScoredTree) -> bool {
        result.offer(self.graph, self.terminals, &candidate.tree, candidate.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improves_uses_tolerance() {
        assert!(improves(1.0, 2.0));
        assert!(!improves(2.0, 2.0));
        assert!(!improves(0.1 + 0.2, 0.3));
        assert!(!improves(3.0, 2.0));
        assert!(improves(1.0, f64::INFINITY));
    }

    #[test]
    fn test_improves_is_scale_free() {
        for scale in [1e-15, 1e-10, 1e-3, 1.0, 1e6] {
            assert!(improves(2.0 * scale, 9.0 * scale), "scale {scale}");
            assert!(!improves(9.0 * scale, 9.0 * scale), "scale {scale}");
        }
        assert!(!improves(0.0, 0.0));
    }
}
