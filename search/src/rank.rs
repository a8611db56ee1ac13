//! Ranking entry point and enumeration loop.
//!
//! # Pipeline
//!
//! ```text
//! validate request + policy
//!   → generate_options(catalog) → ChainSpace (lazy)
//!   → [score_chain → utilization gate → TopKFrontier::offer] × candidates
//!   → into_sorted_vec
//! ```
//!
//! Runtime stops (candidate budget, cancellation) still return the best
//! chains seen so far; [`RankOutcome::termination`] says why the loop ended.

use ratiochain_kernel::carrier::catalog::RatioCatalog;
use ratiochain_kernel::carrier::chain::{ChainSpace, MAX_CHAIN_STAGES};
use ratiochain_kernel::carrier::option::generate_options;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::frontier::TopKFrontier;
use crate::policy::{CancelFlag, RankPolicy, CANCEL_CHECK_INTERVAL};
use crate::scorer::{ChainScorer, ScoredChain, StrategyScorer, TargetRange};
use crate::strategy::{Strategy, StrategyWeights};

/// A validated ranking request: what to search for, independent of strategy.
#[derive(Debug, Clone, Copy)]
pub struct RankRequest {
    chain_length: usize,
    target: TargetRange,
    catalog: RatioCatalog,
}

impl RankRequest {
    /// Validate a request over the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidChainLength`] for a chain length of zero
    /// or above [`MAX_CHAIN_STAGES`], and [`SearchError::InvalidTargetBound`]
    /// for a non-positive bound.
    pub fn new(chain_length: usize, target_min: f64, target_max: f64) -> Result<Self, SearchError> {
        if chain_length == 0 || chain_length > MAX_CHAIN_STAGES {
            return Err(SearchError::InvalidChainLength {
                value: chain_length,
            });
        }
        Ok(Self {
            chain_length,
            target: TargetRange::new(target_min, target_max)?,
            catalog: RatioCatalog::standard(),
        })
    }

    /// Search over a different (already validated) catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: RatioCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn chain_length(&self) -> usize {
        self.chain_length
    }

    #[must_use]
    pub fn target(&self) -> TargetRange {
        self.target
    }

    #[must_use]
    pub fn catalog(&self) -> RatioCatalog {
        self.catalog
    }
}

/// Why the enumeration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every chain in the space was considered.
    Exhausted,
    /// `RankPolicy::max_candidates` was reached.
    CandidateBudgetExceeded,
    /// The caller's [`CancelFlag`] was set.
    Cancelled,
}

impl TerminationReason {
    /// Stable snake-case tag used in report artifacts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::CandidateBudgetExceeded => "candidate_budget_exceeded",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Aggregate loop counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankStats {
    /// Size of the full chain space (saturating).
    pub candidate_space: u64,
    /// Chains pulled from the chain space and scored.
    pub candidates_scored: u64,
    /// Chains dropped by the full-utilization gate.
    pub filtered_by_utilization: u64,
    /// Chains that scored `+∞`.
    pub degenerate: u64,
    /// Largest frontier size reached.
    pub frontier_high_water: usize,
}

/// Result of one ranking run.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// Best chains, ascending by score, at most `top_n`.
    pub results: Vec<ScoredChain>,
    pub termination: TerminationReason,
    pub stats: RankStats,
}

impl RankOutcome {
    /// `true` if the whole chain space was considered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.termination == TerminationReason::Exhausted
    }
}

/// Rank the chain space of `request` with an arbitrary scorer.
///
/// # Errors
///
/// Returns [`SearchError`] only for pre-flight validation failures; no
/// chain is scored in that case.
pub fn rank_with_scorer(
    request: &RankRequest,
    scorer: &dyn ChainScorer,
    policy: &RankPolicy,
    cancel: Option<&CancelFlag>,
) -> Result<RankOutcome, SearchError> {
    policy.validate()?;
    request.catalog.validate()?;

    let options = generate_options(&request.catalog);
    let space = ChainSpace::new(&options, request.chain_length)?;
    let mut stats = RankStats {
        candidate_space: space.candidate_count(),
        ..RankStats::default()
    };
    debug!(
        chain_length = request.chain_length,
        options = options.len(),
        candidate_space = stats.candidate_space,
        top_n = policy.top_n,
        "ranking chain space"
    );

    let gate = scorer.requires_full_utilization();
    let mut frontier = TopKFrontier::new(policy.top_n);
    let mut termination = TerminationReason::Exhausted;

    for (order, chain) in (0u64..).zip(space) {
        if policy.max_candidates.is_some_and(|max| order >= max) {
            termination = TerminationReason::CandidateBudgetExceeded;
            break;
        }
        if order % CANCEL_CHECK_INTERVAL == 0 && cancel.is_some_and(CancelFlag::is_cancelled) {
            termination = TerminationReason::Cancelled;
            break;
        }

        let scored = scorer.score_chain(chain);
        stats.candidates_scored += 1;
        if scored.is_degenerate() {
            stats.degenerate += 1;
        }
        if gate && !scored.has_full_utilization() {
            stats.filtered_by_utilization += 1;
            continue;
        }
        frontier.offer(order, scored);
    }

    stats.frontier_high_water = frontier.high_water();
    let results = frontier.into_sorted_vec();
    info!(
        chain_length = request.chain_length,
        scored = stats.candidates_scored,
        filtered = stats.filtered_by_utilization,
        returned = results.len(),
        termination = termination.as_str(),
        "ranking finished"
    );

    Ok(RankOutcome {
        results,
        termination,
        stats,
    })
}

/// Rank the chain space of `request` under one weight record.
///
/// # Errors
///
/// See [`rank_with_scorer`].
pub fn rank(
    request: &RankRequest,
    weights: &StrategyWeights,
    policy: &RankPolicy,
    cancel: Option<&CancelFlag>,
) -> Result<RankOutcome, SearchError> {
    let scorer = StrategyScorer::new(request.target, *weights);
    rank_with_scorer(request, &scorer, policy, cancel)
}

/// Find the `top_n` best chains of `chain_length` stages for a named strategy.
///
/// All inputs are validated before the search starts.
///
/// # Errors
///
/// Returns [`SearchError`] for a zero chain length, a non-positive target
/// bound, a zero `top_n` or an unknown strategy name.
pub fn find_best_configurations(
    chain_length: usize,
    target_min: f64,
    target_max: f64,
    top_n: usize,
    strategy: &str,
) -> Result<Vec<ScoredChain>, SearchError> {
    let request = RankRequest::new(chain_length, target_min, target_max)?;
    let policy = RankPolicy::with_top_n(top_n);
    policy.validate()?;
    let strategy: Strategy = strategy.parse()?;
    Ok(rank(&request, &strategy.weights(), &policy, None)?.results)
}
