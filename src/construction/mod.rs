//! Greedy construction heuristics.
//!
//! Every heuristic reads the graph through a [`WeightMap`] overlay, so
//! GRASP can bias it with perturbed weights, and finishes with the same
//! cleanup: the minimum spanning tree of the subgraph induced by the chosen
//! vertices, trimmed of non-terminal leaves. The returned tree carries the
//! overlay weights; callers restore true weights with
//! [`Graph::reweight_from`].

mod component;
mod shortest_path;
mod spanning;

use rand::Rng;

use crate::approx::TwoApproximation;
use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::{Graph, Terminals, WeightMap};

/// Construction heuristic selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Construction {
    /// Grows a tree from a random terminal by repeatedly attaching the
    /// terminal closest to the partial tree along its shortest path.
    ShortestPath,
    /// Starts from singleton terminal components and repeatedly merges the
    /// two closest components.
    Component,
    /// Alternates minimum spanning tree and leaf trimming until no vertex
    /// is removed.
    Mst,
    /// The distance-network 2-approximation.
    TwoApproximation,
}

impl Construction {
    /// All heuristics, in the order GRASP runs them on its first iterations.
    pub const ALL: [Construction; 4] = [
        Construction::ShortestPath,
        Construction::Component,
        Construction::Mst,
        Construction::TwoApproximation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Construction::ShortestPath => "shortest-path",
            Construction::Component => "component",
            Construction::Mst => "mst",
            Construction::TwoApproximation => "two-approximation",
        }
    }

    /// Builds a tree for `terminals` on `graph` as weighted by `weights`.
    ///
    /// The result is a tree (or a forest when the terminals are not
    /// connected) carrying overlay weights.
    pub fn construct<R: Rng>(
        &self,
        graph: &Graph,
        terminals: &Terminals,
        weights: &WeightMap,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<Graph, SteinerError> {
        let weighted = graph.with_weights(weights);
        match self {
            Construction::ShortestPath => {
                shortest_path::construct(&weighted, terminals, rng, cancel)
            }
            Construction::Component => component::construct(&weighted, terminals, cancel),
            Construction::Mst => spanning::construct(&weighted, terminals, cancel),
            Construction::TwoApproximation => {
                TwoApproximation::solve(&weighted, terminals, cancel)
            }
        }
    }
}
