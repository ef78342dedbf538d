//! Weight-penalization relinking.

use rand::Rng;

use crate::construction::Construction;
use crate::error::SteinerError;
use crate::graph::{Graph, WeightMap};
use crate::local_search::HybridLocalSearch;
use crate::result::SteinerResult;
use crate::search::{ScoredTree, SearchContext};

use super::elite::{EliteArchive, EliteSolution};

/// Multiplier range for edges used by exactly one of the two trees.
const SHARED_PENALTY: std::ops::Range<f64> = 50.0..100.0;
/// Multiplier for edges used by neither tree.
const UNUSED_PENALTY: f64 = 2000.0;

/// Overlay that keeps the true weight of edges common to `a` and `b`,
/// inflates edges in only one of them by a random factor and edges in
/// neither by a large constant.
pub(crate) fn penalized_weights<R: Rng>(
    graph: &Graph,
    a: &EliteSolution,
    b: &EliteSolution,
    rng: &mut R,
) -> WeightMap {
    let mut weights = WeightMap::new();
    for edge in graph.edges() {
        let key = edge.key();
        let weight = match (a.edges().contains(&key), b.edges().contains(&key)) {
            (true, true) => edge.weight,
            (true, false) | (false, true) => edge.weight * rng.random_range(SHARED_PENALTY),
            (false, false) => edge.weight * UNUSED_PENALTY,
        };
        weights.set(key, weight);
    }
    weights
}

/// For each pair, builds a shortest-path construction under the penalized
/// overlay, improves it with local search and offers it to `next`.
pub(crate) fn penalization(
    ctx: &mut SearchContext<'_>,
    pairs: &[(&EliteSolution, &EliteSolution)],
    result: &mut SteinerResult,
    next: &mut EliteArchive,
) -> Result<(), SteinerError> {
    for &(a, b) in pairs {
        ctx.check_cancelled()?;
        let weights = penalized_weights(ctx.graph, a, b, &mut ctx.rng);
        let mut tree = Construction::ShortestPath.construct(
            ctx.graph,
            ctx.terminals,
            &weights,
            &mut ctx.rng,
            &ctx.cancel,
        )?;
        tree.reweight_from(ctx.graph)?;
        if !ctx.is_valid(&tree) {
            continue;
        }
        let start = ScoredTree::new(tree);
        ctx.offer(result, &start);
        let local = HybridLocalSearch::run(ctx, start, result)?;
        next.insert(local.weight, local.tree);
    }
    Ok(())
}
