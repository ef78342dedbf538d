//! Selector over the algorithms of this crate.

use tracing::debug;

use crate::approx::{TwoApproximation, Zelikovsky};
use crate::cancel::CancelToken;
use crate::construction::Construction;
use crate::error::SteinerError;
use crate::execution::SteinerAlgorithm;
use crate::graph::{Graph, Terminals, WeightMap};
use crate::grasp::{GraspConfig, GraspRunner};
use crate::local_search::{FastLocalSearch, LocalSearchConfig};
use crate::random::{create_rng, DEFAULT_SEED};
use crate::result::SteinerResult;
use crate::search::SearchContext;

/// Every algorithm the executor can run.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use std::time::Duration;
/// use steiner_grasp::algorithm::Algorithm;
/// use steiner_grasp::execution::run_with_time_limit;
/// use steiner_grasp::graph::Graph;
/// use steiner_grasp::local_search::LocalSearchConfig;
///
/// let graph = Graph::try_from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)]).unwrap();
/// let terminals = BTreeSet::from([1, 3]);
/// let algorithm = Algorithm::FastLocalSearch(LocalSearchConfig::default());
/// let limit = Some(Duration::from_secs(10));
/// let result = run_with_time_limit(&algorithm, &graph, &terminals, limit).unwrap();
/// assert_eq!(result.weight(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Distance-network 2-approximation.
    TwoApproximation,
    /// 11/6-approximation by triple contraction.
    Zelikovsky,
    /// 2-approximation followed by the fast local search neighbourhoods.
    FastLocalSearch(LocalSearchConfig),
    /// GRASP with perturbations and path relinking.
    HybridGrasp(GraspConfig),
    /// A single construction heuristic on the true weights.
    Construction(Construction),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::HybridGrasp(GraspConfig::default())
    }
}

impl SteinerAlgorithm for Algorithm {
    fn name(&self) -> &str {
        match self {
            Algorithm::TwoApproximation => "two-approximation",
            Algorithm::Zelikovsky => "zelikovsky",
            Algorithm::FastLocalSearch(_) => "fast-local-search",
            Algorithm::HybridGrasp(_) => "hybrid-grasp",
            Algorithm::Construction(construction) => construction.name(),
        }
    }

    fn run_instance(
        &self,
        graph: &Graph,
        terminals: &Terminals,
        result: &mut SteinerResult,
        cancel: &CancelToken,
    ) -> Result<(), SteinerError> {
        match self {
            Algorithm::TwoApproximation => {
                let tree = TwoApproximation::solve(graph, terminals, cancel)?;
                let weight = tree.total_weight();
                result.offer(graph, terminals, &tree, weight);
            }
            Algorithm::Zelikovsky => {
                let tree = Zelikovsky::solve(graph, terminals, cancel)?;
                let weight = tree.total_weight();
                result.offer(graph, terminals, &tree, weight);
            }
            Algorithm::FastLocalSearch(config) => {
                let mut ctx = SearchContext::new(graph, terminals, config.seed, cancel.clone());
                FastLocalSearch::new(config.clone()).run(&mut ctx, result)?;
            }
            Algorithm::HybridGrasp(config) => {
                let report = GraspRunner::run(graph, terminals, config, result, cancel)?;
                debug!(
                    iterations = report.iterations,
                    relinking_rounds = report.relinking_rounds,
                    cancelled = report.cancelled,
                    "grasp finished"
                );
                if report.cancelled {
                    return Err(SteinerError::Cancelled);
                }
            }
            Algorithm::Construction(construction) => {
                let mut rng = create_rng(DEFAULT_SEED);
                let weights = WeightMap::from_graph(graph);
                let mut tree = construction.construct(graph, terminals, &weights, &mut rng, cancel)?;
                tree.reweight_from(graph)?;
                let weight = tree.total_weight();
                result.offer(graph, terminals, &tree, weight);
            }
        }
        Ok(())
    }
}
