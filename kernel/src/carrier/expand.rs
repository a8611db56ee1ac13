//! State expansion: every switch combination of a chain and its output ratio.
//!
//! Sample `j` of a chain with `N` stages sets stage `i` On iff bit
//! `N - 1 - i` of `j` is set, so stage 0 varies slowest and the last stage
//! toggles fastest. The product is always accumulated in stage order from
//! `1.0`; exact float equality of ratios depends on that order.

use crate::carrier::chain::{Chain, MAX_CHAIN_STAGES};

/// One switch combination and the ratio it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSample {
    /// Product of the selected per-stage factors.
    pub ratio: f64,
    /// `states[i]` is `true` when stage `i` is On.
    pub states: Vec<bool>,
}

impl StateSample {
    /// Integer encoding of the switch vector, LSB-first (bit `i` = stage `i`).
    ///
    /// Chains are capped at [`MAX_CHAIN_STAGES`], so every stage has a bit.
    #[must_use]
    pub fn code(&self) -> u64 {
        self.states
            .iter()
            .take(64)
            .enumerate()
            .filter(|(_, on)| **on)
            .fold(0u64, |acc, (i, _)| acc | (1u64 << i))
    }
}

/// Per-stage `[off, on]` factors in stage order.
fn stage_factors(chain: &Chain) -> Vec<[f64; 2]> {
    chain
        .stages()
        .iter()
        .map(|s| [s.factor(false), s.factor(true)])
        .collect()
}

fn product(factors: &[[f64; 2]], sample: usize) -> f64 {
    let n = factors.len();
    factors
        .iter()
        .enumerate()
        .fold(1.0, |acc, (i, pair)| acc * pair[(sample >> (n - 1 - i)) & 1])
}

/// `2^n`. [`Chain`] never exceeds [`MAX_CHAIN_STAGES`] stages, so the
/// shift cannot overflow for any chain that exists.
fn sample_count(n: usize) -> usize {
    u32::try_from(n)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .unwrap_or(1 << MAX_CHAIN_STAGES)
}

/// Expand a chain into exactly `2^N` samples.
#[must_use]
pub fn detailed_ratios(chain: &Chain) -> Vec<StateSample> {
    let factors = stage_factors(chain);
    let n = factors.len();
    (0..sample_count(n))
        .map(|sample| StateSample {
            ratio: product(&factors, sample),
            states: (0..n).map(|i| (sample >> (n - 1 - i)) & 1 == 1).collect(),
        })
        .collect()
}

/// Ratios only, in the same order as [`detailed_ratios`], without building
/// state vectors. Used on the ranking hot path.
#[must_use]
pub fn raw_ratios(chain: &Chain) -> Vec<f64> {
    let factors = stage_factors(chain);
    (0..sample_count(factors.len()))
        .map(|sample| product(&factors, sample))
        .collect()
}

/// Sort ascending and drop exact duplicates.
#[must_use]
pub fn sorted_distinct(mut ratios: Vec<f64>) -> Vec<f64> {
    ratios.sort_by(f64::total_cmp);
    ratios.dedup_by(|a, b| a == b);
    ratios
}

/// Distinct achievable ratios of a chain, ascending.
#[must_use]
pub fn transmission_ratios(chain: &Chain) -> Vec<f64> {
    sorted_distinct(raw_ratios(chain))
}
