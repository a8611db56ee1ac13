//! Ranking property lock tests.
//!
//! Proves, over the whole two-stage chain space:
//! 1. The chain space has the combinations-with-replacement size
//! 2. Every chain expands to exactly `2^N` samples
//! 3. The main sequence is idempotent and strictly spaced
//! 4. The bounded frontier agrees with a brute-force stable sort
//! 5. The utilization gate removes exactly the collapsed chains

use lock_tests::ranking_helpers::{all_chains, brute_force_rank};
use ratiochain_kernel::carrier::chain::combinations_with_replacement_count;
use ratiochain_kernel::carrier::expand::{detailed_ratios, transmission_ratios};
use ratiochain_kernel::carrier::sequence::{main_sequence, MAIN_SEQUENCE_MARGIN};
use ratiochain_search::policy::RankPolicy;
use ratiochain_search::rank::{find_best_configurations, rank, RankRequest};
use ratiochain_search::strategy::{Strategy, StrategyWeights};

// ---------------------------------------------------------------------------
// 1. Chain space size
// ---------------------------------------------------------------------------

#[test]
fn chain_space_sizes() {
    assert_eq!(all_chains(1).len(), 42);
    assert_eq!(all_chains(2).len(), 903);
    assert_eq!(all_chains(3).len(), 13_244);
    assert_eq!(combinations_with_replacement_count(42, 2), 903);
}

#[test]
fn chain_stages_are_non_decreasing_in_option_order() {
    let chains = all_chains(2);
    // First chain repeats option 0; last repeats option 41.
    assert_eq!(chains[0].stages()[0], chains[0].stages()[1]);
    assert_eq!(chains[902].stages()[0], chains[902].stages()[1]);
    assert_ne!(chains[0].stages()[0], chains[902].stages()[0]);
}

// ---------------------------------------------------------------------------
// 2. Expansion size
// ---------------------------------------------------------------------------

#[test]
fn every_chain_expands_to_two_to_the_n() {
    for n in 1..=3 {
        for chain in all_chains(n).iter().step_by(97) {
            assert_eq!(detailed_ratios(chain).len(), 1 << n);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Main sequence
// ---------------------------------------------------------------------------

#[test]
fn main_sequence_idempotent_and_spaced_over_space() {
    for chain in all_chains(2) {
        let ratios = transmission_ratios(&chain);
        let seq = main_sequence(&ratios);
        assert_eq!(main_sequence(&seq), seq, "not idempotent for {chain}");
        for pair in seq.windows(2) {
            assert!(
                pair[1] > pair[0] * MAIN_SEQUENCE_MARGIN,
                "gap below margin for {chain}: {pair:?}"
            );
        }
        assert_eq!(seq.first(), ratios.first());
    }
}

// ---------------------------------------------------------------------------
// 4. Frontier vs brute force
// ---------------------------------------------------------------------------

#[test]
fn frontier_matches_brute_force_for_every_strategy() {
    let request = RankRequest::new(2, 0.5, 3.0).unwrap();
    for strategy in Strategy::ALL {
        let weights = strategy.weights();
        let outcome = rank(&request, &weights, &RankPolicy::with_top_n(25), None).unwrap();
        let expected = brute_force_rank(2, 0.5, 3.0, weights, 25);
        assert_eq!(outcome.results, expected, "mismatch for {strategy}");
    }
}

#[test]
fn results_sorted_and_bounded() {
    for strategy in Strategy::ALL {
        for top_n in [1, 5, 50] {
            let results = find_best_configurations(2, 0.8, 2.5, top_n, strategy.name()).unwrap();
            assert!(results.len() <= top_n);
            assert!(results.len() <= 903);
            for pair in results.windows(2) {
                assert!(pair[0].score <= pair[1].score);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Utilization gate
// ---------------------------------------------------------------------------

#[test]
fn gate_removes_exactly_collapsed_chains() {
    let collapsed = all_chains(2)
        .iter()
        .filter(|c| transmission_ratios(c).len() < 4)
        .count() as u64;
    assert!(collapsed > 0);

    let request = RankRequest::new(2, 0.5, 3.0).unwrap();
    let weights = StrategyWeights {
        filter_max_utilization: true,
        ..Strategy::Balanced.weights()
    };
    let outcome = rank(&request, &weights, &RankPolicy::with_top_n(5), None).unwrap();
    assert_eq!(outcome.stats.filtered_by_utilization, collapsed);
    assert!(outcome.results.iter().all(|r| r.ratios.len() == 4));
    assert_eq!(outcome.results, brute_force_rank(2, 0.5, 3.0, weights, 5));
}
