//! Error type shared by every solver component.

use thiserror::Error;

/// Errors raised while building instances or running a search.
///
/// [`SteinerError::Cancelled`] is a control signal rather than a failure:
/// every loop that observes a cancelled [`CancelToken`](crate::cancel::CancelToken)
/// returns it so callers can unwind to the outermost loop and keep the best
/// result obtained so far. The executor never reports it to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteinerError {
    /// The search was asked to stop.
    #[error("search cancelled")]
    Cancelled,

    /// An internal consistency check failed. Indicates a logic defect.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input graph or terminal set is malformed.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}

impl SteinerError {
    /// Returns `true` for the cancellation control signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SteinerError::Cancelled)
    }
}
