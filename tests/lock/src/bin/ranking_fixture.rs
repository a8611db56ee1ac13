//! Binary that runs every strategy through the harness and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `ranking_fixture [config.json]`
//!
//! Without an argument the default configuration is used. Output is one
//! `key=value` group per line:
//!
//! ```text
//! report_digest=sha256:...
//! config_hash=sha256:...
//! strategy=<name> termination=<tag> best_score_bits=<hex> export_code=<code>
//! artifact_count=3
//! ```
//!
//! Logs go to stderr, filtered by `RUST_LOG`, so stdout stays byte-stable.

use std::error::Error;
use std::path::Path;

use ratiochain_harness::config::RunConfig;
use ratiochain_harness::details::ConfigurationDetail;
use ratiochain_harness::report::{build_report, RUN_CONFIG_ARTIFACT};
use ratiochain_harness::runner::run_all_strategies;
use ratiochain_kernel::proof::canon::f64_bits_hex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::from_path(Path::new(&path))?,
        None => RunConfig::default(),
    };

    let run = run_all_strategies(&config, None)?;
    let report = build_report(&run)?;

    println!("report_digest={}", report.digest.as_str());
    if let Some(snapshot) = report.get(RUN_CONFIG_ARTIFACT) {
        println!("config_hash={}", snapshot.content_hash.as_str());
    }
    for r in &run.runs {
        let (bits, code) = r.outcome.results.first().map_or_else(
            || ("none".to_string(), String::new()),
            |best| {
                (
                    f64_bits_hex(best.score),
                    ConfigurationDetail::from_chain(&best.chain).export_code,
                )
            },
        );
        println!(
            "strategy={} termination={} best_score_bits={bits} export_code={code}",
            r.strategy.name(),
            r.outcome.termination.as_str(),
        );
    }
    println!("artifact_count={}", report.artifacts.len());
    Ok(())
}
