//! Shared helpers for ratiochain benchmark suites.

use ratiochain_kernel::carrier::catalog::RatioCatalog;
use ratiochain_kernel::carrier::chain::Chain;
use ratiochain_kernel::carrier::option::generate_options;
use ratiochain_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use ratiochain_search::rank::RankOutcome;

/// A representative chain of `chain_length` stages with distinct,
/// non-decreasing options spread across the option list.
///
/// # Panics
///
/// Panics if `chain_length` is zero or above the kernel's stage cap.
/// Benchmark setup failures are fatal.
#[must_use]
pub fn sample_chain(chain_length: usize) -> Chain {
    let options = generate_options(&RatioCatalog::standard());
    let stages = (0..chain_length)
        .map(|i| options[(i * 7 + 3) % options.len()])
        .collect();
    Chain::new(stages).expect("chain length within bounds")
}

/// Digest over a ranking's result identities and score bits.
///
/// Benchmarks compute this once before timing and again after, so a
/// nondeterministic ranker fails the run instead of producing numbers.
#[must_use]
pub fn determinism_guard(outcome: &RankOutcome) -> ContentHash {
    let mut bytes = Vec::new();
    for r in &outcome.results {
        bytes.extend_from_slice(&r.score.to_bits().to_le_bytes());
        bytes.extend_from_slice(r.chain.to_string().as_bytes());
        bytes.push(0);
    }
    canonical_hash(HashDomain::BenchGuard, &bytes)
}
