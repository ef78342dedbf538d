//! Edge weight perturbation between GRASP iterations.

use std::collections::HashMap;

use rand::Rng;

use crate::graph::{EdgeKey, Graph, WeightMap};
use crate::random::uniform_between;

/// Perturbation regime, rotated round-robin across iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Perturbation {
    /// Frequently used edges are biased towards their true weight.
    Intensification,
    /// Frequently used edges are biased upward.
    Diversification,
    /// Every edge shares the same multiplier.
    UniformPenalization,
}

impl Perturbation {
    pub const ALL: [Perturbation; 3] = [
        Perturbation::Intensification,
        Perturbation::Diversification,
        Perturbation::UniformPenalization,
    ];

    /// Upper multiplier for an edge that appeared in `trust` of the
    /// locally optimized trees before `iteration`.
    ///
    /// # Examples
    ///
    /// ```
    /// use steiner_grasp::grasp::Perturbation;
    ///
    /// assert_eq!(Perturbation::Intensification.coefficient(0, 5), 2.0);
    /// assert_eq!(Perturbation::Intensification.coefficient(4, 5), 1.25);
    /// assert_eq!(Perturbation::Diversification.coefficient(4, 5), 2.0);
    /// assert_eq!(Perturbation::UniformPenalization.coefficient(3, 5), 2.0);
    /// ```
    pub fn coefficient(&self, trust: u32, iteration: usize) -> f64 {
        let span = iteration.saturating_sub(1).max(1) as f64;
        let share = f64::from(trust) / span;
        match self {
            Perturbation::Intensification => 2.0 - 0.75 * share,
            Perturbation::Diversification => 1.25 + 0.75 * share,
            Perturbation::UniformPenalization => 2.0,
        }
    }
}

/// Redraws every edge weight of `weights` uniformly between the true
/// weight and the true weight times the regime's coefficient.
pub fn perturb_weights<R: Rng>(
    graph: &Graph,
    trust: &HashMap<EdgeKey, u32>,
    regime: Perturbation,
    iteration: usize,
    weights: &mut WeightMap,
    rng: &mut R,
) {
    for edge in graph.edges() {
        let key = edge.key();
        let count = trust.get(&key).copied().unwrap_or(0);
        let bound = edge.weight * regime.coefficient(count, iteration);
        weights.set(key, uniform_between(edge.weight, bound, rng));
    }
}
