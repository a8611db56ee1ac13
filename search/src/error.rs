//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (budget exhaustion, cancellation) are expressed via
//! [`crate::rank::TerminationReason`] and still return the best results seen.

use ratiochain_kernel::carrier::chain::MAX_CHAIN_STAGES;
use ratiochain_kernel::error::KernelError;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before any chain is enumerated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Chain length must be between one and [`MAX_CHAIN_STAGES`] stages.
    #[error("chain length must be between 1 and {max}, got {value}", max = MAX_CHAIN_STAGES)]
    InvalidChainLength { value: usize },

    /// A target bound is zero, negative or not finite.
    #[error("target {bound} must be a positive finite number, got {value}")]
    InvalidTargetBound { bound: &'static str, value: f64 },

    /// The requested strategy name is not in the catalog.
    #[error("unknown strategy: {name:?}")]
    UnknownStrategy { name: String },

    /// The result cap must be at least one.
    #[error("top_n must be a positive integer")]
    InvalidTopN,

    /// A candidate budget of zero would never score anything.
    #[error("max_candidates must be positive when set")]
    InvalidCandidateBudget,

    /// Kernel construction failed (catalog or chain space).
    #[error(transparent)]
    Kernel(#[from] KernelError),
}
