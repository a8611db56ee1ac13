//! In-process determinism lock tests.
//!
//! Proves:
//! 1. Repeated runs produce byte-identical normative artifacts
//! 2. Parallel and sequential runs produce the same report digest
//! 3. The report digest depends on the configuration

use ratiochain_harness::config::RunConfig;
use ratiochain_harness::report::{
    build_report, verify_report, ReportBundle, COMPARISON_REPORT_ARTIFACT, RUN_CONFIG_ARTIFACT,
};
use ratiochain_harness::runner::run_all_strategies;

fn report(config: &RunConfig) -> ReportBundle {
    build_report(&run_all_strategies(config, None).unwrap()).unwrap()
}

#[test]
fn repeated_runs_are_identical() {
    let config = RunConfig::default();
    let first = report(&config);
    verify_report(&first).unwrap();
    for _ in 0..3 {
        let again = report(&config);
        assert_eq!(again.digest, first.digest);
        for name in [RUN_CONFIG_ARTIFACT, COMPARISON_REPORT_ARTIFACT] {
            assert_eq!(
                again.get(name).unwrap().content,
                first.get(name).unwrap().content,
                "{name} differs between runs"
            );
        }
    }
}

#[test]
fn parallel_matches_sequential() {
    let parallel = report(&RunConfig::default());
    let sequential = report(&RunConfig {
        parallel: false,
        ..RunConfig::default()
    });
    assert_eq!(parallel.digest, sequential.digest);
    assert_eq!(parallel.digest_basis, sequential.digest_basis);
}

#[test]
fn digest_tracks_configuration() {
    let base = report(&RunConfig::default());
    let narrower = report(&RunConfig {
        target_max: 2.0,
        ..RunConfig::default()
    });
    let fewer = report(&RunConfig {
        top_n: 3,
        ..RunConfig::default()
    });
    assert_ne!(base.digest, narrower.digest);
    assert_ne!(base.digest, fewer.digest);
}

#[test]
fn strategy_order_in_config_does_not_matter() {
    let forward = report(&RunConfig {
        strategies: vec!["Balanced".into(), "Max Gears".into()],
        ..RunConfig::default()
    });
    let reversed = report(&RunConfig {
        strategies: vec!["Max Gears".into(), "Balanced".into()],
        ..RunConfig::default()
    });
    assert_eq!(forward.digest, reversed.digest);
}
