//! Hybrid GRASP execution engine.
//!
//! # Algorithm
//!
//! 1. For each iteration i:
//!    a. Pick a construction heuristic: heuristic i for the first
//!    iterations, a random one afterwards.
//!    b. After the first round of heuristics, perturb every edge weight
//!    according to the regime of iteration i and the edge's trust count.
//!    c. Construct a tree on the perturbed weights and re-score it on the
//!    true weights.
//!    d. Improve it with the hybrid local search, bump the trust count of
//!    each of its edges and offer it to the elite archive.
//! 2. Relink the elite archive until a round fails to improve.
//! 3. Return the best tree found anywhere.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::{EdgeKey, Graph, Terminals, WeightMap};
use crate::local_search::HybridLocalSearch;
use crate::random;
use crate::relinking::{relink, EliteArchive};
use crate::result::SteinerResult;
use crate::search::{ScoredTree, SearchContext};

use super::config::GraspConfig;
use super::perturbation::perturb_weights;

/// Statistics of a GRASP run. The trees themselves go to the
/// [`SteinerResult`].
#[derive(Debug, Clone, Default)]
pub struct GraspReport {
    /// Iterations whose construction produced a valid tree.
    pub iterations: usize,
    /// Best weight held by the result after each iteration.
    pub cost_history: Vec<f64>,
    /// Number of path relinking rounds run.
    pub relinking_rounds: usize,
    /// Weight of the best archive entry before relinking.
    pub elite_best: Option<f64>,
    /// Whether the run stopped on a cancellation request.
    pub cancelled: bool,
}

/// Hybrid GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP with path relinking, writing every improvement into
    /// `result`.
    ///
    /// When `cancel` fires the run stops early and the report is marked
    /// `cancelled`; `result` then holds the best tree found up to that
    /// point. Terminals that are not connected leave `result` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use steiner_grasp::cancel::CancelToken;
    /// use steiner_grasp::graph::Graph;
    /// use steiner_grasp::grasp::{GraspConfig, GraspRunner};
    /// use steiner_grasp::result::SteinerResult;
    ///
    /// let graph = Graph::try_from_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (1, 4, 5.0)]).unwrap();
    /// let terminals = BTreeSet::from([1, 3]);
    /// let mut result = SteinerResult::new();
    /// GraspRunner::run(&graph, &terminals, &GraspConfig::default(), &mut result, &CancelToken::new()).unwrap();
    /// assert_eq!(result.weight(), 2.0);
    /// ```
    #[tracing::instrument(
        level = "debug",
        name = "grasp",
        skip_all,
        fields(vertices = graph.vertex_count(), terminals = terminals.len())
    )]
    pub fn run(
        graph: &Graph,
        terminals: &Terminals,
        config: &GraspConfig,
        result: &mut SteinerResult,
        cancel: &CancelToken,
    ) -> Result<GraspReport, SteinerError> {
        config.validate().map_err(SteinerError::InvalidConfig)?;
        let mut ctx = SearchContext::new(graph, terminals, config.seed, cancel.clone());
        let mut report = GraspReport::default();
        if !ctx.is_feasible() {
            debug!("terminals are not connected");
            return Ok(report);
        }

        match Self::search(&mut ctx, config, result, &mut report) {
            Ok(()) => {}
            Err(SteinerError::Cancelled) => {
                debug!(weight = result.weight(), "grasp cancelled");
                report.cancelled = true;
            }
            Err(err) => return Err(err),
        }
        Ok(report)
    }

    fn search(
        ctx: &mut SearchContext<'_>,
        config: &GraspConfig,
        result: &mut SteinerResult,
        report: &mut GraspReport,
    ) -> Result<(), SteinerError> {
        let graph = ctx.graph;
        let terminals = ctx.terminals;
        let mut weights = WeightMap::from_graph(graph);
        let mut trust: HashMap<EdgeKey, u32> = HashMap::new();
        let mut archive = EliteArchive::new(config.elite_size);
        let constructions = &config.constructions;

        for i in 0..config.iterations {
            ctx.check_cancelled()?;
            let construction = match constructions.get(i) {
                Some(&construction) => construction,
                None => {
                    let regime = config.perturbations[i % config.perturbations.len()];
                    perturb_weights(graph, &trust, regime, i, &mut weights, &mut ctx.rng);
                    *random::pick(constructions, &mut ctx.rng).ok_or_else(|| {
                        SteinerError::InvalidConfig("no construction heuristic".into())
                    })?
                }
            };

            debug!(iteration = i, construction = construction.name(), "constructing greedy solution");
            let mut tree =
                construction.construct(graph, terminals, &weights, &mut ctx.rng, &ctx.cancel)?;
            tree.reweight_from(graph)?;
            if !ctx.is_valid(&tree) {
                warn!(iteration = i, construction = construction.name(), "construction produced an invalid tree");
                report.cost_history.push(result.weight());
                continue;
            }
            let constructed = ScoredTree::new(tree);
            ctx.offer(result, &constructed);

            let local = HybridLocalSearch::run(ctx, constructed, result)?;
            for edge in local.tree.edges() {
                *trust.entry(edge.key()).or_insert(0) += 1;
            }
            debug!(iteration = i, weight = local.weight, best = result.weight(), "iteration finished");
            archive.insert(local.weight, local.tree);
            report.iterations += 1;
            report.cost_history.push(result.weight());
        }

        report.elite_best = archive.best_weight();
        if archive.is_empty() {
            return Ok(());
        }

        debug!(entries = archive.len(), "applying path relinking");
        let (archive, rounds) = relink(ctx, archive, config.relinking, result)?;
        report.relinking_rounds = rounds;
        if let Some(best) = archive.best() {
            result.offer(graph, terminals, &best.tree, best.weight);
        }
        debug!(weight = result.weight(), "best solution");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::Construction;
    use crate::graph::tree::is_steiner_tree;
    use crate::relinking::RelinkingStrategy;
    use std::collections::BTreeSet;

    fn grid(n: u32) -> Graph {
        let mut edges = Vec::new();
        for r in 0..n {
            for c in 0..n {
                let v = r * n + c;
                if c + 1 < n {
                    edges.push((v, v + 1, 1.0 + ((v * 7 + 2) % 9) as f64));
                }
                if r + 1 < n {
                    edges.push((v, v + n, 1.0 + ((v * 13 + 5) % 8) as f64));
                }
            }
        }
        Graph::try_from_edges(edges).unwrap()
    }

    fn run(graph: &Graph, terminals: &Terminals, config: &GraspConfig) -> (SteinerResult, GraspReport) {
        let mut result = SteinerResult::new();
        let report =
            GraspRunner::run(graph, terminals, config, &mut result, &CancelToken::new()).unwrap();
        (result, report)
    }

    #[test]
    fn test_grasp_square() {
        let graph = crate::graph::tests::square();
        let terminals = BTreeSet::from([1, 3]);
        let (result, report) = run(&graph, &terminals, &GraspConfig::default());
        assert!((result.weight() - 2.0).abs() < 1e-12);
        assert_eq!(report.iterations, 10);
        assert!(report.relinking_rounds >= 1);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_grasp_star() {
        let graph = Graph::try_from_edges((1..=5).map(|i| (0, i, i as f64))).unwrap();
        let terminals: Terminals = (1..=5).collect();
        let (result, _) = run(&graph, &terminals, &GraspConfig::default());
        assert!((result.weight() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_grasp_grid_is_valid_and_not_worse_than_constructions() {
        let graph = grid(7);
        let terminals: Terminals = [0, 6, 24, 42, 48, 17].into_iter().collect();
        let (result, report) = run(&graph, &terminals, &GraspConfig::default().with_iterations(8));
        let tree = result.tree().expect("grid is connected");
        assert!(is_steiner_tree(&graph, &terminals, tree));
        assert!((tree.total_weight() - result.weight()).abs() < 1e-9);
        assert!(result.weight() <= report.elite_best.unwrap() + 1e-9);
        for window in report.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_grasp_is_deterministic_for_fixed_seed() {
        let graph = grid(6);
        let terminals: Terminals = [0, 5, 30, 35, 14].into_iter().collect();
        let config = GraspConfig::default()
            .with_seed(99)
            .with_relinking(RelinkingStrategy::ComplementaryMoves);
        let (a, report_a) = run(&graph, &terminals, &config);
        let (b, report_b) = run(&graph, &terminals, &config);
        assert_eq!(a.weight(), b.weight());
        assert_eq!(report_a.cost_history, report_b.cost_history);
        assert_eq!(a.tree().unwrap().edge_keys(), b.tree().unwrap().edge_keys());
    }

    #[test]
    fn test_grasp_disconnected_terminals_leave_result_empty() {
        let graph = Graph::try_from_edges([(1, 2, 1.0), (3, 4, 1.0)]).unwrap();
        let terminals = BTreeSet::from([1, 4]);
        let (result, report) = run(&graph, &terminals, &GraspConfig::default());
        assert!(!result.has_solution());
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn test_grasp_trivial_terminal_sets() {
        let graph = crate::graph::tests::square();
        let (single, _) = run(&graph, &BTreeSet::from([2]), &GraspConfig::default());
        assert_eq!(single.weight(), 0.0);
        assert_eq!(single.tree().unwrap().vertex_count(), 1);

        let (empty, _) = run(&graph, &Terminals::new(), &GraspConfig::default());
        assert_eq!(empty.weight(), 0.0);
        assert!(empty.tree().unwrap().is_empty());
    }

    #[test]
    fn test_grasp_single_construction_and_invalid_config() {
        let graph = grid(4);
        let terminals: Terminals = [0, 15].into_iter().collect();
        let config = GraspConfig::default().with_constructions(vec![Construction::Mst]);
        let (result, report) = run(&graph, &terminals, &config);
        assert!(result.has_solution());
        assert_eq!(report.iterations, 10);

        let mut result = SteinerResult::new();
        let err = GraspRunner::run(
            &graph,
            &terminals,
            &GraspConfig::default().with_elite_size(0),
            &mut result,
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SteinerError::InvalidConfig(_)));
    }

    #[test]
    fn test_grasp_cancelled_before_start() {
        let graph = grid(4);
        let terminals: Terminals = [0, 15].into_iter().collect();
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut result = SteinerResult::new();
        let report =
            GraspRunner::run(&graph, &terminals, &GraspConfig::default(), &mut result, &cancel)
                .unwrap();
        assert!(report.cancelled);
        assert_eq!(report.iterations, 0);
        assert!(!result.has_solution());
    }
}
