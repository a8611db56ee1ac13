//! In-memory comparison report: the output of a harness run.
//!
//! Reports live in memory only; the harness never writes them to disk.
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in the report digest)
//! or observational (listed in the manifest but excluded from the digest).
//!
//! | Artifact | Normative | Content |
//! |----------|-----------|---------|
//! | `run_config.json` | yes | canonical config snapshot |
//! | `comparison_report.json` | yes | ranked chains per strategy |
//! | `run_timing.json` | no | wall-clock time per strategy |
//!
//! Timings differ between runs, so they never reach the digest. The digest
//! is computed over the **digest basis**: a canonical JSON projection of
//! normative artifact hashes only.
//!
//! Every float is carried as its IEEE bit pattern (see
//! [`f64_bits_hex`]). Scores also get a rounded display string, which is
//! informational and derived from the bits.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use ratiochain_kernel::carrier::chain::Chain;
use ratiochain_kernel::proof::canon::{canonical_json_bytes, f64_bits_hex, CanonError};
use ratiochain_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use ratiochain_search::rank::RankStats;
use ratiochain_search::scorer::ScoredChain;

use crate::config::ConfigError;
use crate::details::{ConfigurationDetail, ResultStats};
use crate::runner::{ComparisonRun, StrategyRun};

/// Domain prefix for report artifact content hashing.
pub const DOMAIN_REPORT_ARTIFACT: HashDomain = HashDomain::ReportArtifact;

/// Domain prefix for the report digest.
pub const DOMAIN_REPORT_DIGEST: HashDomain = HashDomain::ReportDigest;

pub const RUN_CONFIG_ARTIFACT: &str = "run_config.json";
pub const COMPARISON_REPORT_ARTIFACT: &str = "comparison_report.json";
pub const RUN_TIMING_ARTIFACT: &str = "run_timing.json";

/// `schema_version` of `comparison_report.json`.
pub const REPORT_SCHEMA_VERSION: &str = "ratiochain.report.v1";

const MANIFEST_SCHEMA_VERSION: &str = "report_manifest.v1";
const DIGEST_BASIS_SCHEMA_VERSION: &str = "report_digest_basis.v1";

/// A single artifact in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Logical filename.
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(DOMAIN_REPORT_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the report digest.
    pub normative: bool,
}

/// The complete report of one comparison run.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    /// Artifacts by logical name, sorted.
    pub artifacts: BTreeMap<String, ReportArtifact>,
    /// Canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(DOMAIN_REPORT_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

impl ReportBundle {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReportArtifact> {
        self.artifacts.get(name)
    }

    /// Parse a JSON artifact.
    #[must_use]
    pub fn json(&self, name: &str) -> Option<Value> {
        self.get(name)
            .and_then(|a| serde_json::from_slice(&a.content).ok())
    }
}

/// Error building a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
}

/// Error from report integrity verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportVerifyError {
    #[error("content hash mismatch for {artifact}: expected {expected}, got {actual}")]
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },

    #[error("manifest does not match artifacts")]
    ManifestMismatch,

    #[error("digest basis does not match normative artifacts")]
    DigestBasisMismatch,

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("normative artifact {artifact} is not canonical JSON")]
    ArtifactNotCanonical { artifact: String },

    #[error("required artifact {artifact} is missing")]
    MissingArtifact { artifact: String },

    #[error("canonical JSON error: {detail}")]
    Canon { detail: String },
}

/// Content-addressed identity of a chain's ordered stage list.
///
/// Two results share an identity exactly when they describe the same chain.
///
/// # Errors
///
/// Returns [`CanonError`] if canonical serialization fails.
pub fn chain_identity(chain: &Chain) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&json!({
        "schema_version": "chain_identity.v1",
        "stages": stages_json(chain),
    }))?;
    Ok(canonical_hash(HashDomain::ChainIdentity, &bytes))
}

fn stages_json(chain: &Chain) -> Vec<Value> {
    chain
        .stages()
        .iter()
        .map(|s| {
            json!({
                "off": s.off().label,
                "on": s.on().label,
                "orientation": s.orientation().as_str(),
            })
        })
        .collect()
}

fn stats_json(stats: &RankStats) -> Value {
    json!({
        "candidate_space": stats.candidate_space,
        "candidates_scored": stats.candidates_scored,
        "degenerate": stats.degenerate,
        "filtered_by_utilization": stats.filtered_by_utilization,
        "frontier_high_water": stats.frontier_high_water,
    })
}

fn result_json(rank: usize, scored: &ScoredChain) -> Result<Value, CanonError> {
    let detail = ConfigurationDetail::from_chain(&scored.chain);
    let stats = ResultStats::from_ratios(&scored.ratios);
    Ok(json!({
        "breakdown": {
            "range_bits": f64_bits_hex(scored.breakdown.range),
            "smoothness_bits": f64_bits_hex(scored.breakdown.smoothness),
            "total_bits": f64_bits_hex(scored.breakdown.total),
            "utilization_bits": f64_bits_hex(scored.breakdown.utilization),
        },
        "chain_identity": chain_identity(&scored.chain)?.as_str(),
        "export_code": detail.export_code,
        "left_out_count": detail.left_out.len(),
        "main_sequence": detail.main_sequence.iter().map(|s| s.code()).collect::<Vec<_>>(),
        "rank": rank,
        "ratio_bits": scored.ratios.iter().map(|r| f64_bits_hex(*r)).collect::<Vec<_>>(),
        "score": format!("{:.6}", scored.score),
        "score_bits": f64_bits_hex(scored.score),
        "stages": stages_json(&scored.chain),
        "stats": {
            "avg_step_bits": f64_bits_hex(stats.avg_step),
            "gear_count": stats.gear_count,
            "max_bits": f64_bits_hex(stats.max),
            "min_bits": f64_bits_hex(stats.min),
        },
    }))
}

fn strategy_json(run: &StrategyRun) -> Result<Value, CanonError> {
    let results = run
        .outcome
        .results
        .iter()
        .enumerate()
        .map(|(i, scored)| result_json(i + 1, scored))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(json!({
        "results": results,
        "stats": stats_json(&run.outcome.stats),
        "strategy": run.strategy.name(),
        "termination": run.outcome.termination.as_str(),
    }))
}

fn comparison_report_bytes(
    run: &ComparisonRun,
    config_hash: &ContentHash,
) -> Result<Vec<u8>, CanonError> {
    let strategies = run
        .runs
        .iter()
        .map(strategy_json)
        .collect::<Result<Vec<_>, _>>()?;
    canonical_json_bytes(&json!({
        "chain_length": run.request.chain_length(),
        "config_hash": config_hash.as_str(),
        "schema_version": REPORT_SCHEMA_VERSION,
        "strategies": strategies,
    }))
}

fn run_timing_bytes(run: &ComparisonRun) -> Result<Vec<u8>, CanonError> {
    let strategies: Vec<Value> = run
        .runs
        .iter()
        .map(|r| {
            json!({
                "elapsed_us": u64::try_from(r.elapsed.as_micros()).unwrap_or(u64::MAX),
                "strategy": r.strategy.name(),
            })
        })
        .collect();
    canonical_json_bytes(&json!({
        "schema_version": "run_timing.v1",
        "strategies": strategies,
    }))
}

fn artifact(name: &str, content: Vec<u8>, normative: bool) -> ReportArtifact {
    ReportArtifact {
        name: name.to_string(),
        content_hash: canonical_hash(DOMAIN_REPORT_ARTIFACT, &content),
        content,
        normative,
    }
}

/// Computes the manifest, digest basis and digest over `artifacts`.
fn assemble_report(
    artifacts: BTreeMap<String, ReportArtifact>,
) -> Result<ReportBundle, CanonError> {
    let manifest = manifest_bytes(&artifacts)?;
    let digest_basis = digest_basis_bytes(&artifacts)?;
    let digest = canonical_hash(DOMAIN_REPORT_DIGEST, &digest_basis);
    Ok(ReportBundle {
        artifacts,
        manifest,
        digest_basis,
        digest,
    })
}

/// Build the report of a comparison run.
///
/// # Errors
///
/// Returns [`ReportError`] if canonical serialization fails.
pub fn build_report(run: &ComparisonRun) -> Result<ReportBundle, ReportError> {
    let config_bytes = run.config.snapshot_bytes(&run.strategies())?;
    let config_hash = canonical_hash(HashDomain::RunConfig, &config_bytes);
    let report_bytes = comparison_report_bytes(run, &config_hash)?;
    let timing_bytes = run_timing_bytes(run)?;

    let artifacts: BTreeMap<String, ReportArtifact> = [
        artifact(RUN_CONFIG_ARTIFACT, config_bytes, true),
        artifact(COMPARISON_REPORT_ARTIFACT, report_bytes, true),
        artifact(RUN_TIMING_ARTIFACT, timing_bytes, false),
    ]
    .into_iter()
    .map(|a| (a.name.clone(), a))
    .collect();

    Ok(assemble_report(artifacts)?)
}

/// Verify the internal consistency of a report.
///
/// Pure integrity check; nothing is re-ranked. It proves:
///
/// 1. Both normative artifacts are present.
/// 2. Each artifact's `content_hash` matches its content.
/// 3. `manifest` and `digest_basis` match projections recomputed from the
///    artifacts.
/// 4. `digest` matches `digest_basis`.
/// 5. Normative JSON artifacts are in canonical form.
///
/// # Errors
///
/// Returns the first [`ReportVerifyError`] encountered.
pub fn verify_report(report: &ReportBundle) -> Result<(), ReportVerifyError> {
    for required in [RUN_CONFIG_ARTIFACT, COMPARISON_REPORT_ARTIFACT] {
        if !report.artifacts.contains_key(required) {
            return Err(ReportVerifyError::MissingArtifact {
                artifact: required.to_string(),
            });
        }
    }

    for a in report.artifacts.values() {
        let recomputed = canonical_hash(DOMAIN_REPORT_ARTIFACT, &a.content);
        if recomputed != a.content_hash {
            return Err(ReportVerifyError::ContentHashMismatch {
                artifact: a.name.clone(),
                expected: a.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    let canon = |e: CanonError| ReportVerifyError::Canon {
        detail: e.to_string(),
    };
    if manifest_bytes(&report.artifacts).map_err(canon)? != report.manifest {
        return Err(ReportVerifyError::ManifestMismatch);
    }
    if digest_basis_bytes(&report.artifacts).map_err(canon)? != report.digest_basis {
        return Err(ReportVerifyError::DigestBasisMismatch);
    }

    let digest = canonical_hash(DOMAIN_REPORT_DIGEST, &report.digest_basis);
    if digest != report.digest {
        return Err(ReportVerifyError::DigestMismatch {
            expected: report.digest.as_str().to_string(),
            actual: digest.as_str().to_string(),
        });
    }

    for a in report
        .artifacts
        .values()
        .filter(|a| a.normative && a.name.ends_with(".json"))
    {
        if !is_canonical_json(&a.content) {
            return Err(ReportVerifyError::ArtifactNotCanonical {
                artifact: a.name.clone(),
            });
        }
    }
    Ok(())
}

fn manifest_bytes(artifacts: &BTreeMap<String, ReportArtifact>) -> Result<Vec<u8>, CanonError> {
    let entries: Vec<Value> = artifacts
        .values()
        .map(|a| {
            json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();
    canonical_json_bytes(&json!({
        "artifacts": entries,
        "schema_version": MANIFEST_SCHEMA_VERSION,
    }))
}

fn digest_basis_bytes(
    artifacts: &BTreeMap<String, ReportArtifact>,
) -> Result<Vec<u8>, CanonError> {
    let entries: Vec<Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();
    canonical_json_bytes(&json!({
        "artifacts": entries,
        "schema_version": DIGEST_BASIS_SCHEMA_VERSION,
    }))
}

fn is_canonical_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|v| canonical_json_bytes(&v).ok())
        .is_some_and(|c| c == bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::runner::run_all_strategies;
    use ratiochain_kernel::carrier::catalog::RatioCatalog;
    use ratiochain_kernel::carrier::option::generate_options;
    use std::time::Duration;

    fn small_run() -> ComparisonRun {
        let config = RunConfig {
            chain_length: 1,
            top_n: 3,
            ..RunConfig::default()
        };
        run_all_strategies(&config, None).unwrap()
    }

    #[test]
    fn report_has_three_artifacts_and_verifies() {
        let report = build_report(&small_run()).unwrap();
        assert_eq!(report.artifacts.len(), 3);
        assert!(report.get(RUN_CONFIG_ARTIFACT).unwrap().normative);
        assert!(report.get(COMPARISON_REPORT_ARTIFACT).unwrap().normative);
        assert!(!report.get(RUN_TIMING_ARTIFACT).unwrap().normative);
        verify_report(&report).unwrap();
        assert!(report.digest.as_str().starts_with("sha256:"));
    }

    #[test]
    fn timing_does_not_reach_digest() {
        let run = small_run();
        let mut slow = run.clone();
        for r in &mut slow.runs {
            r.elapsed += Duration::from_secs(7);
        }
        let a = build_report(&run).unwrap();
        let b = build_report(&slow).unwrap();
        assert_ne!(
            a.get(RUN_TIMING_ARTIFACT).unwrap().content,
            b.get(RUN_TIMING_ARTIFACT).unwrap().content
        );
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn report_lists_strategies_in_order_with_ranked_results() {
        let report = build_report(&small_run()).unwrap();
        let json = report.json(COMPARISON_REPORT_ARTIFACT).unwrap();
        assert_eq!(json["schema_version"], REPORT_SCHEMA_VERSION);
        let strategies = json["strategies"].as_array().unwrap();
        assert_eq!(strategies.len(), 5);
        assert_eq!(strategies[0]["strategy"], "Balanced");
        assert_eq!(strategies[4]["strategy"], "Quality Over Quantity");
        let results = strategies[0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["rank"], 1);
        assert_eq!(strategies[0]["termination"], "exhausted");
    }

    #[test]
    fn score_bits_round_trip() {
        let run = small_run();
        let report = build_report(&run).unwrap();
        let json = report.json(COMPARISON_REPORT_ARTIFACT).unwrap();
        let bits = json["strategies"][1]["results"][0]["score_bits"]
            .as_str()
            .unwrap();
        let score = ratiochain_kernel::proof::canon::f64_from_bits_hex(bits).unwrap();
        assert_eq!(score.to_bits(), run.runs[1].outcome.results[0].score.to_bits());
    }

    #[test]
    fn chain_identity_distinguishes_stage_order() {
        let options = generate_options(&RatioCatalog::standard());
        let ab = Chain::new(vec![options[0], options[1]]).unwrap();
        let ba = Chain::new(vec![options[1], options[0]]).unwrap();
        let a = chain_identity(&ab).unwrap();
        assert_ne!(a, chain_identity(&ba).unwrap());
        assert_eq!(a, chain_identity(&ab.clone()).unwrap());
    }

    #[test]
    fn tampered_content_detected() {
        let mut report = build_report(&small_run()).unwrap();
        if let Some(a) = report.artifacts.get_mut(COMPARISON_REPORT_ARTIFACT) {
            a.content.push(b' ');
        }
        assert!(matches!(
            verify_report(&report),
            Err(ReportVerifyError::ContentHashMismatch { .. })
        ));
    }

    #[test]
    fn tampered_digest_detected() {
        let mut report = build_report(&small_run()).unwrap();
        report.digest = canonical_hash(DOMAIN_REPORT_DIGEST, b"other");
        assert!(matches!(
            verify_report(&report),
            Err(ReportVerifyError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn missing_normative_artifact_detected() {
        let mut report = build_report(&small_run()).unwrap();
        report.artifacts.remove(RUN_CONFIG_ARTIFACT);
        assert_eq!(
            verify_report(&report).unwrap_err(),
            ReportVerifyError::MissingArtifact {
                artifact: RUN_CONFIG_ARTIFACT.to_string()
            }
        );
    }
}
