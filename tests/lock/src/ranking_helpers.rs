//! Reference computations the lock tests compare the ranker against.
//!
//! These deliberately take the slow road: materialize every chain, score
//! it, and stable-sort the lot. Agreement with the bounded frontier is the
//! property under test.

use ratiochain_kernel::carrier::catalog::RatioCatalog;
use ratiochain_kernel::carrier::chain::{Chain, ChainSpace};
use ratiochain_kernel::carrier::option::generate_options;
use ratiochain_search::scorer::{ChainScorer, ScoredChain, StrategyScorer, TargetRange};
use ratiochain_search::strategy::StrategyWeights;

/// Every chain of `chain_length` stages over the standard catalog, in
/// enumeration order.
///
/// # Panics
///
/// Panics if `chain_length` is zero.
#[must_use]
pub fn all_chains(chain_length: usize) -> Vec<Chain> {
    let options = generate_options(&RatioCatalog::standard());
    ChainSpace::new(&options, chain_length).unwrap().collect()
}

/// Brute-force ranking: score everything, drop gated chains, stable sort by
/// score, keep the first `top_n`.
///
/// # Panics
///
/// Panics if `chain_length` is zero or the target is invalid.
#[must_use]
pub fn brute_force_rank(
    chain_length: usize,
    target_min: f64,
    target_max: f64,
    weights: StrategyWeights,
    top_n: usize,
) -> Vec<ScoredChain> {
    let scorer = StrategyScorer::new(TargetRange::new(target_min, target_max).unwrap(), weights);
    let mut scored: Vec<ScoredChain> = all_chains(chain_length)
        .into_iter()
        .map(|c| scorer.score_chain(c))
        .filter(|s| !weights.filter_max_utilization || s.has_full_utilization())
        .collect();
    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored.truncate(top_n);
    scored
}
