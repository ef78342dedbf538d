//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SteinerError;

/// Shared stop flag polled by every unbounded loop of the search.
///
/// Cloning the token shares the underlying flag, so the executor can keep
/// one handle and hand another to the worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing flag, e.g. one owned by a host application.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns [`SteinerError::Cancelled`] once cancellation was requested.
    #[inline]
    pub fn check(&self) -> Result<(), SteinerError> {
        if self.is_cancelled() {
            Err(SteinerError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_clear() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let worker = token.clone();
        token.cancel();
        assert!(worker.is_cancelled());
        assert_eq!(worker.check(), Err(SteinerError::Cancelled));
    }

    #[test]
    fn test_from_external_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let token = CancelToken::from_flag(Arc::clone(&flag));
        flag.store(true, Ordering::Relaxed);
        assert!(token.check().unwrap_err().is_cancelled());
    }
}
