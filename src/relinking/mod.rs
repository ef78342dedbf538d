//! Path relinking over an elite archive.
//!
//! Relinking runs in rounds. Each round turns the current archive into a
//! candidate archive with one of the strategies below; the loop continues
//! only while the candidate's best entry is strictly lighter than the
//! current one, and every round's best entry is offered to the result.
//!
//! # Reference
//!
//! Ribeiro, C. C., Uchoa, E. & Werneck, R. F. (2002). "A hybrid GRASP with
//! perturbations for the Steiner problem in graphs", *INFORMS Journal on
//! Computing* 14(3), 228-246.

mod complementary;
mod elite;
mod penalization;

use std::time::Instant;

use tracing::{debug, trace};

use crate::error::SteinerError;
use crate::result::SteinerResult;
use crate::search::{improves, SearchContext};

pub use elite::{EliteArchive, EliteSolution};

use complementary::complementary;
use penalization::penalization;

/// How a relinking round derives the next archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelinkingStrategy {
    /// Vertex-by-vertex walks between every ordered pair of entries.
    ComplementaryMoves,
    /// Penalized shortest-path constructions for every ordered pair of
    /// entries, self-pairs included, each with a fresh random overlay.
    WeightPenalization,
    /// Both strategies between the best entry and the others, then the
    /// faster of the two for the remaining pairs.
    #[default]
    Hybrid,
}

type Pair<'a> = (&'a EliteSolution, &'a EliteSolution);

fn ordered_pairs(entries: &[EliteSolution]) -> Vec<Pair<'_>> {
    let mut pairs = Vec::new();
    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate() {
            if i != j {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

fn all_pairs(entries: &[EliteSolution]) -> Vec<Pair<'_>> {
    entries
        .iter()
        .flat_map(|a| entries.iter().map(move |b| (a, b)))
        .collect()
}

impl RelinkingStrategy {
    /// Produces the next archive from `archive`.
    pub fn apply(
        &self,
        ctx: &mut SearchContext<'_>,
        archive: &EliteArchive,
        result: &mut SteinerResult,
    ) -> Result<EliteArchive, SteinerError> {
        let mut next = EliteArchive::new(archive.capacity());
        match self {
            RelinkingStrategy::ComplementaryMoves => {
                complementary(ctx, &ordered_pairs(archive.entries()), &mut next)?;
            }
            RelinkingStrategy::WeightPenalization => {
                penalization(ctx, &all_pairs(archive.entries()), result, &mut next)?;
            }
            RelinkingStrategy::Hybrid => hybrid(ctx, archive, result, &mut next)?,
        }
        Ok(next)
    }
}

fn hybrid(
    ctx: &mut SearchContext<'_>,
    archive: &EliteArchive,
    result: &mut SteinerResult,
    next: &mut EliteArchive,
) -> Result<(), SteinerError> {
    let Some((best, rest)) = archive.entries().split_first() else {
        return Ok(());
    };
    let with_best: Vec<Pair<'_>> = rest.iter().map(|entry| (entry, best)).collect();

    let started = Instant::now();
    complementary(ctx, &with_best, next)?;
    let complementary_time = started.elapsed();

    let started = Instant::now();
    penalization(ctx, &with_best, result, next)?;
    let penalization_time = started.elapsed();

    if complementary_time < penalization_time {
        trace!(?complementary_time, ?penalization_time, "relinking remaining pairs by complementary moves");
        complementary(ctx, &ordered_pairs(rest), next)?;
    } else {
        trace!(?complementary_time, ?penalization_time, "relinking remaining pairs by weight penalization");
        penalization(ctx, &all_pairs(rest), result, next)?;
    }
    next.insert(best.weight, best.tree.clone());
    Ok(())
}

/// Runs relinking rounds until a round fails to improve the best entry.
///
/// Returns the archive of the last improving round together with the
/// number of rounds run.
pub fn relink(
    ctx: &mut SearchContext<'_>,
    archive: EliteArchive,
    strategy: RelinkingStrategy,
    result: &mut SteinerResult,
) -> Result<(EliteArchive, usize), SteinerError> {
    let mut current = archive;
    let mut rounds = 0;
    loop {
        if let Some(best) = current.best() {
            result.offer(ctx.graph, ctx.terminals, &best.tree, best.weight);
        }
        ctx.check_cancelled()?;
        let next = strategy.apply(ctx, &current, result)?;
        rounds += 1;
        if let Some(best) = next.best() {
            result.offer(ctx.graph, ctx.terminals, &best.tree, best.weight);
        }
        let improved = match (next.best_weight(), current.best_weight()) {
            (Some(candidate), Some(incumbent)) => improves(candidate, incumbent),
            _ => false,
        };
        debug!(
            round = rounds,
            best = ?next.best_weight(),
            entries = next.len(),
            improved,
            "relinking round finished"
        );
        if !improved {
            return Ok((current, rounds));
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::construction::Construction;
    use crate::graph::{Graph, Terminals, WeightMap};
    use crate::local_search::HybridLocalSearch;
    use crate::random::create_rng;
    use crate::search::ScoredTree;

    fn grid(n: u32) -> Graph {
        let mut edges = Vec::new();
        for r in 0..n {
            for c in 0..n {
                let v = r * n + c;
                if c + 1 < n {
                    edges.push((v, v + 1, 1.0 + ((v * 5 + 3) % 7) as f64));
                }
                if r + 1 < n {
                    edges.push((v, v + n, 1.0 + ((v * 11 + 1) % 6) as f64));
                }
            }
        }
        Graph::try_from_edges(edges).unwrap()
    }

    fn seeded_archive(ctx: &mut SearchContext<'_>, result: &mut SteinerResult) -> EliteArchive {
        let mut archive = EliteArchive::new(5);
        let weights = WeightMap::from_graph(ctx.graph);
        for (i, construction) in Construction::ALL.iter().enumerate() {
            let mut rng = create_rng(i as u64);
            let tree = construction
                .construct(ctx.graph, ctx.terminals, &weights, &mut rng, &ctx.cancel)
                .unwrap();
            result.offer(ctx.graph, ctx.terminals, &tree, tree.total_weight());
            archive.insert(tree.total_weight(), tree);
        }
        let first = archive.best().unwrap().tree.clone();
        let local = HybridLocalSearch::run(ctx, ScoredTree::new(first), result).unwrap();
        archive.insert(local.weight, local.tree);
        archive
    }

    #[test]
    fn test_pair_builders() {
        let mut archive = EliteArchive::new(3);
        archive.insert(1.0, Graph::try_from_edges([(1, 2, 1.0)]).unwrap());
        archive.insert(2.0, Graph::try_from_edges([(1, 3, 2.0)]).unwrap());
        archive.insert(3.0, Graph::try_from_edges([(1, 4, 3.0)]).unwrap());
        assert_eq!(ordered_pairs(archive.entries()).len(), 6);
        assert_eq!(all_pairs(archive.entries()).len(), 9);
        assert_eq!(all_pairs(&archive.entries()[..1]).len(), 1);
        assert!(ordered_pairs(&archive.entries()[..1]).is_empty());
    }

    #[test]
    fn test_penalization_relinks_a_lone_entry_with_itself() {
        let graph = grid(4);
        let terminals: Terminals = [0, 3, 15].into_iter().collect();
        let mut ctx = SearchContext::new(&graph, &terminals, 9, CancelToken::new());
        let mut result = SteinerResult::new();
        let weights = WeightMap::from_graph(&graph);
        let tree = Construction::Mst
            .construct(&graph, &terminals, &weights, &mut create_rng(1), &ctx.cancel)
            .unwrap();
        let mut archive = EliteArchive::new(3);
        archive.insert(tree.total_weight(), tree);

        let next = RelinkingStrategy::WeightPenalization
            .apply(&mut ctx, &archive, &mut result)
            .unwrap();
        assert_eq!(next.len(), 1);
        assert!(ctx.is_valid(&next.entries()[0].tree));
        assert!(next.best_weight().unwrap() <= archive.best_weight().unwrap() + 1e-9);
    }

    #[test]
    fn test_every_strategy_never_worsens_the_result() {
        let graph = grid(5);
        let terminals: Terminals = [0, 4, 12, 20, 24].into_iter().collect();
        for strategy in [
            RelinkingStrategy::ComplementaryMoves,
            RelinkingStrategy::WeightPenalization,
            RelinkingStrategy::Hybrid,
        ] {
            let mut ctx = SearchContext::new(&graph, &terminals, 17, CancelToken::new());
            let mut result = SteinerResult::new();
            let archive = seeded_archive(&mut ctx, &mut result);
            let before = archive.best_weight().unwrap();

            let (last, rounds) = relink(&mut ctx, archive, strategy, &mut result).unwrap();
            assert!(rounds >= 1);
            assert!(
                last.best_weight().unwrap() <= before,
                "{strategy:?} returned a worse archive"
            );
            assert!(result.weight() <= before + 1e-9);
            assert!(ctx.is_valid(result.tree().unwrap()));
            for pair in last.entries().windows(2) {
                assert!(pair[0].weight <= pair[1].weight, "archive must stay sorted");
            }
        }
    }

    #[test]
    fn test_hybrid_keeps_best_entry() {
        let graph = grid(4);
        let terminals: Terminals = [0, 3, 15].into_iter().collect();
        let mut ctx = SearchContext::new(&graph, &terminals, 5, CancelToken::new());
        let mut result = SteinerResult::new();
        let archive = seeded_archive(&mut ctx, &mut result);
        let best = archive.best_weight().unwrap();

        let next = RelinkingStrategy::Hybrid.apply(&mut ctx, &archive, &mut result).unwrap();
        assert!(next.best_weight().unwrap() <= best);
    }

    #[test]
    fn test_relink_observes_cancellation() {
        let graph = grid(3);
        let terminals: Terminals = [0, 8].into_iter().collect();
        let cancel = CancelToken::new();
        let mut ctx = SearchContext::new(&graph, &terminals, 5, cancel.clone());
        let mut result = SteinerResult::new();
        let archive = seeded_archive(&mut ctx, &mut result);
        cancel.cancel();
        let err = relink(&mut ctx, archive, RelinkingStrategy::Hybrid, &mut result).unwrap_err();
        assert!(err.is_cancelled());
        assert!(result.has_solution());
    }
}
