//! Time-limited execution of Steiner tree algorithms.
//!
//! An algorithm runs on a scoped worker thread and writes its best tree so
//! far into a [`SteinerResult`]. When the time limit expires the executor
//! raises the cancellation flag, waits for the worker to unwind, and returns
//! whatever the result holds with its timeout flag set.

use std::panic;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::algorithm::Algorithm;
use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::is_steiner_tree;
use crate::graph::{Graph, Terminals};
use crate::grasp::GraspConfig;
use crate::result::SteinerResult;

/// Time limit used by [`solve`].
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(300);

/// A Steiner tree algorithm runnable by the executor.
///
/// Implementations write improvements into `result` as they find them and
/// poll `cancel` in every unbounded loop, returning
/// [`SteinerError::Cancelled`] once it fires.
pub trait SteinerAlgorithm: Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn run_instance(
        &self,
        graph: &Graph,
        terminals: &Terminals,
        result: &mut SteinerResult,
        cancel: &CancelToken,
    ) -> Result<(), SteinerError>;
}

/// Runs `algorithm` under `time_limit` (`None` waits indefinitely).
pub fn run_with_time_limit<A>(
    algorithm: &A,
    graph: &Graph,
    terminals: &Terminals,
    time_limit: Option<Duration>,
) -> Result<SteinerResult, SteinerError>
where
    A: SteinerAlgorithm + ?Sized,
{
    run_with_cancel(algorithm, graph, terminals, time_limit, CancelToken::new())
}

/// Like [`run_with_time_limit`], with a caller-owned cancellation token
/// that can stop the run early. The timeout flag is only set when the time
/// limit expired.
///
/// Cancellation is not an error: the best result found so far is returned.
/// Invariant violations and configuration errors are returned as errors,
/// and a panicking worker is re-raised on the calling thread.
#[tracing::instrument(level = "debug", skip_all, fields(algorithm = algorithm.name()))]
pub fn run_with_cancel<A>(
    algorithm: &A,
    graph: &Graph,
    terminals: &Terminals,
    time_limit: Option<Duration>,
    cancel: CancelToken,
) -> Result<SteinerResult, SteinerError>
where
    A: SteinerAlgorithm + ?Sized,
{
    graph.check_terminals(terminals)?;

    let mut result = SteinerResult::new();
    let started = Instant::now();
    let (outcome, timed_out) = thread::scope(|scope| {
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let worker_cancel = cancel.clone();
        let worker_result = &mut result;
        let handle = scope.spawn(move || {
            let outcome = algorithm.run_instance(graph, terminals, worker_result, &worker_cancel);
            let _ = done_tx.send(());
            outcome
        });

        let timed_out = match time_limit {
            Some(limit) => matches!(done_rx.recv_timeout(limit), Err(RecvTimeoutError::Timeout)),
            None => {
                let _ = done_rx.recv();
                false
            }
        };
        if timed_out {
            debug!(?time_limit, "time limit reached, cancelling");
            cancel.cancel();
        }
        match handle.join() {
            Ok(outcome) => (outcome, timed_out),
            Err(payload) => panic::resume_unwind(payload),
        }
    });

    match outcome {
        Ok(()) => {}
        Err(SteinerError::Cancelled) => debug!("search cancelled, keeping best result"),
        Err(err) => return Err(err),
    }

    result.set_runtime(started.elapsed());
    result.set_timeout(timed_out);
    if let Some(tree) = result.tree() {
        let consistent = (tree.total_weight() - result.weight()).abs()
            <= 1e-9 * result.weight().abs().max(1.0);
        if !consistent || !is_steiner_tree(graph, terminals, tree) {
            warn!("final tree failed verification, discarding it");
            result.discard();
        }
    }
    debug!(%result, "run finished");
    Ok(result)
}

/// Solves with the hybrid GRASP under [`DEFAULT_TIME_LIMIT`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use steiner_grasp::execution::solve;
/// use steiner_grasp::graph::Graph;
///
/// let graph = Graph::try_from_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (1, 4, 5.0)]).unwrap();
/// let result = solve(&graph, &BTreeSet::from([1, 3])).unwrap();
/// assert_eq!(result.weight(), 2.0);
/// assert!(!result.is_timeout());
/// ```
pub fn solve(graph: &Graph, terminals: &Terminals) -> Result<SteinerResult, SteinerError> {
    run_with_time_limit(
        &Algorithm::HybridGrasp(GraspConfig::default()),
        graph,
        terminals,
        Some(DEFAULT_TIME_LIMIT),
    )
}
