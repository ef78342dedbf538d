//! Local search drivers.

use tracing::debug;

use crate::approx::TwoApproximation;
use crate::error::SteinerError;
use crate::result::SteinerResult;
use crate::search::{ScoredTree, SearchContext};

use super::config::LocalSearchConfig;
use super::key_path::key_path_exchange_step;
use super::key_vertex::key_vertex_elimination_pass;
use super::vertex_moves::{
    insertion_deletion_pass, vertex_elimination_pass, vertex_insertion_pass,
};

/// Applies `step` until it stops improving. Returns whether it improved at
/// least once.
fn exhaust<F>(
    ctx: &mut SearchContext<'_>,
    current: &mut ScoredTree,
    result: &mut SteinerResult,
    mut step: F,
) -> Result<bool, SteinerError>
where
    F: FnMut(&mut SearchContext<'_>, &mut ScoredTree, &mut SteinerResult) -> Result<bool, SteinerError>,
{
    let mut improved = false;
    while step(ctx, current, result)? {
        improved = true;
        ctx.check_cancelled()?;
    }
    Ok(improved)
}

/// Local search embedded in GRASP: randomized vertex insertion/deletion
/// followed by key-path exchange, repeated while either improves.
pub struct HybridLocalSearch;

impl HybridLocalSearch {
    /// Improves `start` in place of the caller and returns the local optimum.
    ///
    /// Every strict improvement is offered to `result` as it is found.
    pub fn run(
        ctx: &mut SearchContext<'_>,
        start: ScoredTree,
        result: &mut SteinerResult,
    ) -> Result<ScoredTree, SteinerError> {
        let mut current = start;
        let mut rounds = 0usize;
        loop {
            ctx.check_cancelled()?;
            rounds += 1;
            let vertex_moves = exhaust(ctx, &mut current, result, insertion_deletion_pass)?;
            let key_paths = exhaust(ctx, &mut current, result, key_path_exchange_step)?;
            if !vertex_moves && !key_paths {
                break;
            }
        }
        debug!(weight = current.weight, rounds, "local search converged");
        Ok(current)
    }
}

/// Standalone local search seeded with the 2-approximation.
///
/// Cycles through the enabled neighbourhoods in the order key-path
/// exchange, key-vertex elimination, vertex insertion, vertex elimination,
/// exhausting each one, until a full cycle brings no improvement.
///
/// # Reference
///
/// Uchoa, E. & Werneck, R. F. (2010). "Fast local search for Steiner trees
/// in graphs", *Proceedings of ALENEX 2010*, 1-10.
#[derive(Debug, Clone, Default)]
pub struct FastLocalSearch {
    config: LocalSearchConfig,
}

impl FastLocalSearch {
    pub fn new(config: LocalSearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Runs the search. Returns `None` when the 2-approximation found no
    /// valid starting tree, i.e. the terminals are not connected.
    ///
    /// # Errors
    ///
    /// [`SteinerError::InvalidConfig`] when no neighbourhood is enabled.
    #[tracing::instrument(level = "debug", name = "fast_local_search", skip_all)]
    pub fn run(
        &self,
        ctx: &mut SearchContext<'_>,
        result: &mut SteinerResult,
    ) -> Result<Option<ScoredTree>, SteinerError> {
        self.config.validate().map_err(SteinerError::InvalidConfig)?;
        let start = TwoApproximation::solve_with_paths(&mut ctx.paths, ctx.terminals, &ctx.cancel)?;
        if !ctx.is_valid(&start) {
            debug!("no valid starting tree");
            return Ok(None);
        }
        let mut current = ScoredTree::new(start);
        ctx.offer(result, &current);
        debug!(weight = current.weight, "starting from 2-approximation");

        let config = &self.config;
        let mut improved = true;
        while improved {
            ctx.check_cancelled()?;
            improved = false;
            if config.key_path_exchange {
                improved |= exhaust(ctx, &mut current, result, key_path_exchange_step)?;
            }
            if config.key_vertex_elimination {
                improved |= exhaust(ctx, &mut current, result, key_vertex_elimination_pass)?;
            }
            if config.vertex_insertion {
                improved |= exhaust(ctx, &mut current, result, vertex_insertion_pass)?;
            }
            if config.vertex_elimination {
                improved |= exhaust(ctx, &mut current, result, vertex_elimination_pass)?;
            }
            debug!(weight = current.weight, improved, "neighbourhood cycle finished");
        }
        Ok(Some(current))
    }
}
