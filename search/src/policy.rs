//! Ranking policy: result cap, candidate budget and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SearchError;

/// Default number of chains returned per strategy.
pub const DEFAULT_TOP_N: usize = 5;

/// The ranker polls the cancel flag once every this many candidates.
pub const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Budget and result-cap configuration for one ranking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPolicy {
    /// Maximum number of chains returned.
    pub top_n: usize,
    /// Hard cap on enumerated candidates. `None` scores the whole space.
    pub max_candidates: Option<u64>,
}

impl RankPolicy {
    /// Policy returning `top_n` results over the full chain space.
    #[must_use]
    pub fn with_top_n(top_n: usize) -> Self {
        Self {
            top_n,
            ..Self::default()
        }
    }

    /// Reject caps that could never produce a result.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidTopN`] for `top_n == 0` and
    /// [`SearchError::InvalidCandidateBudget`] for `max_candidates == Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_n == 0 {
            return Err(SearchError::InvalidTopN);
        }
        if self.max_candidates == Some(0) {
            return Err(SearchError::InvalidCandidateBudget);
        }
        Ok(())
    }
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_candidates: None,
        }
    }
}

/// Shared cancellation flag.
///
/// Clones share the same flag. The caller may set it from any thread (for
/// example a wall-clock watchdog); the ranker stops at its next poll and
/// returns the best results seen so far.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
