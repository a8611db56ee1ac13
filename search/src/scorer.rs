//! Chain scoring types and traits.
//!
//! Lower scores are better. A score has three weighted terms:
//!
//! - **range**: relative error of the lowest and highest achievable ratio
//!   against the target bounds
//! - **smoothness**: population std-dev of log-space gaps in the main
//!   sequence, plus the raw utilization penalty
//! - **utilization**: share of switch combinations that collapse onto
//!   near-duplicate ratios
//!
//! The raw utilization penalty is counted in both the smoothness and the
//! utilization term.

use ratiochain_kernel::carrier::chain::Chain;
use ratiochain_kernel::carrier::expand::transmission_ratios;
use ratiochain_kernel::carrier::sequence::main_sequence;

use crate::error::SearchError;
use crate::strategy::StrategyWeights;

/// Penalty used for both the smoothness and utilization terms when a chain
/// has at most one main-sequence ratio.
pub const FLAT_SEQUENCE_PENALTY: f64 = 500.0;

/// Target output-ratio bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    min: f64,
    max: f64,
}

impl TargetRange {
    /// Validate and build a target range.
    ///
    /// `min < max` is expected but not enforced.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidTargetBound`] if either bound is zero,
    /// negative or not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, SearchError> {
        for (bound, value) in [("min", min), ("max", max)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SearchError::InvalidTargetBound { bound, value });
            }
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// The three weighted score terms and their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub range: f64,
    pub smoothness: f64,
    pub utilization: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Worst possible score, for a chain with no achievable ratio.
    pub const DEGENERATE: ScoreBreakdown = ScoreBreakdown {
        range: f64::INFINITY,
        smoothness: f64::INFINITY,
        utilization: f64::INFINITY,
        total: f64::INFINITY,
    };
}

/// Score a sorted distinct ratio list for a chain of `chain_length` stages.
#[must_use]
pub fn score_breakdown(
    ratios: &[f64],
    chain_length: usize,
    target: &TargetRange,
    weights: &StrategyWeights,
) -> ScoreBreakdown {
    let (Some(&actual_min), Some(&actual_max)) = (ratios.first(), ratios.last()) else {
        return ScoreBreakdown::DEGENERATE;
    };

    let min_error = (actual_min - target.min).abs() / target.min;
    let max_error = (actual_max - target.max).abs() / target.max;
    let range = (min_error * 100.0 + max_error * 100.0) * weights.range;

    let main = main_sequence(ratios);
    let (smoothness, utilization) = if main.len() > 1 {
        let logs: Vec<f64> = main.iter().map(|r| r.ln()).collect();
        let gaps: Vec<f64> = logs.windows(2).map(|w| w[1] - w[0]).collect();
        #[allow(clippy::cast_precision_loss)]
        let count = gaps.len() as f64;
        let mean = gaps.iter().sum::<f64>() / count;
        let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / count;
        let raw_smoothness = variance.sqrt() * 1000.0;

        let max_possible = f64::powi(2.0, i32::try_from(chain_length).unwrap_or(i32::MAX));
        #[allow(clippy::cast_precision_loss)]
        let used = main.len() as f64 / max_possible;
        let raw_utilization = (1.0 - used) * 500.0;

        (
            (raw_smoothness + raw_utilization) * weights.smoothness,
            raw_utilization * weights.utilization,
        )
    } else {
        (
            FLAT_SEQUENCE_PENALTY * weights.smoothness,
            FLAT_SEQUENCE_PENALTY * weights.utilization,
        )
    };

    ScoreBreakdown {
        range,
        smoothness,
        utilization,
        total: range + smoothness + utilization,
    }
}

/// A chain with its score and distinct achievable ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChain {
    /// Total score (lower is better).
    pub score: f64,
    /// Per-term score components.
    pub breakdown: ScoreBreakdown,
    /// The scored chain.
    pub chain: Chain,
    /// Exact-distinct achievable ratios, ascending.
    pub ratios: Vec<f64>,
}

impl ScoredChain {
    /// `true` if the chain scored `+∞` (no achievable ratio).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.score == f64::INFINITY
    }

    /// `true` if every one of the `2^N` switch combinations yields a
    /// distinct ratio.
    #[must_use]
    pub fn has_full_utilization(&self) -> bool {
        self.ratios.len() as u64 == self.chain.state_count()
    }
}

/// Trait for chain scoring.
///
/// Implementations must be pure: the same chain always yields the same
/// score, so rankings are reproducible.
pub trait ChainScorer: Send + Sync {
    /// Score one chain.
    fn score_chain(&self, chain: Chain) -> ScoredChain;

    /// Whether the ranker should drop chains without full utilization.
    fn requires_full_utilization(&self) -> bool {
        false
    }
}

/// Default scorer: a target range and one strategy's weights.
#[derive(Debug, Clone, Copy)]
pub struct StrategyScorer {
    target: TargetRange,
    weights: StrategyWeights,
}

impl StrategyScorer {
    #[must_use]
    pub fn new(target: TargetRange, weights: StrategyWeights) -> Self {
        Self { target, weights }
    }
}

impl ChainScorer for StrategyScorer {
    fn score_chain(&self, chain: Chain) -> ScoredChain {
        let ratios = transmission_ratios(&chain);
        let breakdown = score_breakdown(&ratios, chain.len(), &self.target, &self.weights);
        ScoredChain {
            score: breakdown.total,
            breakdown,
            chain,
            ratios,
        }
    }

    fn requires_full_utilization(&self) -> bool {
        self.weights.filter_max_utilization
    }
}
