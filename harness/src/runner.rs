//! Harness runner: one ranking per selected strategy.
//!
//! The runner uses only search APIs: it validates a [`RunConfig`] once, then
//! calls [`rank`] for each strategy. It does not score or order chains itself.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → [rank(request, weights, policy) × strategies]
//!   → ComparisonRun (catalog order)
//! ```
//!
//! With `parallel` set the strategies run on the rayon global pool. Each
//! ranking is independent and deterministic, so the results are identical
//! either way.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{info, warn};

use ratiochain_kernel::carrier::chain::combinations_with_replacement_count;
use ratiochain_kernel::carrier::option::option_count;
use ratiochain_search::error::SearchError;
use ratiochain_search::policy::{CancelFlag, RankPolicy};
use ratiochain_search::rank::{rank, RankOutcome, RankRequest};
use ratiochain_search::strategy::Strategy;

use crate::config::{ConfigError, RunConfig};

/// Error during a comparison run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The configuration failed validation. Nothing was searched.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A ranking failed its own pre-flight checks.
    #[error("ranking failed: {0}")]
    Search(#[from] SearchError),
}

/// One strategy's ranking.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub outcome: RankOutcome,
    /// Wall-clock time of the ranking. Observational only.
    pub elapsed: Duration,
}

/// All strategy rankings of one configuration.
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub config: RunConfig,
    pub request: RankRequest,
    pub policy: RankPolicy,
    /// In catalog order, one per selected strategy.
    pub runs: Vec<StrategyRun>,
}

impl ComparisonRun {
    /// The run for `strategy`, if it was selected.
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> Option<&StrategyRun> {
        self.runs.iter().find(|r| r.strategy == strategy)
    }

    /// Selected strategies, in catalog order.
    #[must_use]
    pub fn strategies(&self) -> Vec<Strategy> {
        self.runs.iter().map(|r| r.strategy).collect()
    }

    /// `true` if every ranking covered its whole chain space.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.runs.iter().all(|r| r.outcome.is_complete())
    }
}

fn run_strategy(
    strategy: Strategy,
    request: &RankRequest,
    policy: &RankPolicy,
    cancel: Option<&CancelFlag>,
) -> Result<StrategyRun, SearchError> {
    let started = Instant::now();
    let outcome = rank(request, &strategy.weights(), policy, cancel)?;
    let elapsed = started.elapsed();
    info!(
        strategy = strategy.name(),
        chain_length = request.chain_length(),
        candidates = outcome.stats.candidates_scored,
        termination = outcome.termination.as_str(),
        elapsed_ms = elapsed.as_millis(),
        "strategy ranked"
    );
    Ok(StrategyRun {
        strategy,
        outcome,
        elapsed,
    })
}

/// Rank the chain space once per selected strategy.
///
/// The configuration is validated before any ranking starts. `cancel` is
/// shared by every ranking; a cancelled run still returns each strategy's
/// best chains so far.
///
/// # Errors
///
/// Returns [`RunError::Config`] if validation fails.
pub fn run_all_strategies(
    config: &RunConfig,
    cancel: Option<&CancelFlag>,
) -> Result<ComparisonRun, RunError> {
    let resolved = config.validate()?;
    if config.is_long_search() {
        warn!(
            chain_length = config.chain_length,
            candidate_space = combinations_with_replacement_count(
                option_count(resolved.request.catalog().len()),
                config.chain_length,
            ),
            "long search: chain length above the interactive threshold"
        );
    }

    let request = resolved.request;
    let policy = resolved.policy;
    let runs: Vec<StrategyRun> = if config.parallel {
        resolved
            .strategies
            .par_iter()
            .map(|s| run_strategy(*s, &request, &policy, cancel))
            .collect::<Result<_, _>>()?
    } else {
        resolved
            .strategies
            .iter()
            .map(|s| run_strategy(*s, &request, &policy, cancel))
            .collect::<Result<_, _>>()?
    };

    Ok(ComparisonRun {
        config: config.clone(),
        request,
        policy,
        runs,
    })
}
