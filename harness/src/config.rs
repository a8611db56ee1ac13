//! Run configuration.
//!
//! A [`RunConfig`] is plain data: it can be built in code, or deserialized
//! from JSON. Missing fields take their [`Default`] values; unknown fields are
//! rejected. Validation happens in the runner, before any search starts.
//!
//! ```json
//! {
//!   "chain_length": 3,
//!   "target_min": 0.5,
//!   "target_max": 3.0,
//!   "top_n": 5,
//!   "strategies": ["Balanced", "Max Gears"],
//!   "max_candidates": null,
//!   "parallel": true
//! }
//! ```

use std::path::Path;

use ratiochain_kernel::proof::canon::{canonical_json_bytes, f64_bits_hex};
use ratiochain_search::error::SearchError;
use ratiochain_search::policy::{RankPolicy, DEFAULT_TOP_N};
use ratiochain_search::rank::RankRequest;
use ratiochain_search::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// Chain lengths above this are flagged as long-running searches.
pub const LONG_SEARCH_CHAIN_LENGTH: usize = 5;

/// Error loading a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {detail}")]
    Io { path: String, detail: String },

    /// The configuration is not valid JSON for [`RunConfig`].
    #[error("invalid run configuration: {detail}")]
    Parse { detail: String },

    /// Canonical serialization of the snapshot failed.
    #[error("canonical JSON error: {detail}")]
    Canon { detail: String },

    /// A strategy is listed more than once.
    #[error("strategy {name:?} listed more than once")]
    DuplicateStrategy { name: String },

    /// Request, policy or strategy validation failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// A configuration that passed validation.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub request: RankRequest,
    pub policy: RankPolicy,
    /// Selected strategies in catalog order.
    pub strategies: Vec<Strategy>,
}

/// Parameters for one multi-strategy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Number of stages per chain.
    pub chain_length: usize,
    /// Lower target output ratio.
    pub target_min: f64,
    /// Upper target output ratio.
    pub target_max: f64,
    /// Results kept per strategy.
    pub top_n: usize,
    /// Strategy names to run. Empty runs the whole catalog.
    pub strategies: Vec<String>,
    /// Optional cap on candidates scored per strategy.
    pub max_candidates: Option<u64>,
    /// Run strategies on the rayon thread pool.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            chain_length: 2,
            target_min: 0.5,
            target_max: 3.0,
            top_n: DEFAULT_TOP_N,
            strategies: Strategy::ALL.iter().map(|s| s.name().to_string()).collect(),
            max_candidates: None,
            parallel: true,
        }
    }
}

impl RunConfig {
    /// Parse a configuration from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, wrong field types
    /// or unknown fields.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`RunConfig::from_json_slice`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Validate every field and resolve strategy names.
    ///
    /// Checks run in the same order as `find_best_configurations`: request,
    /// then policy, then strategy names. An empty strategy list selects the
    /// whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Search`] for an invalid request, policy or
    /// strategy name, and [`ConfigError::DuplicateStrategy`] for a repeated
    /// name.
    pub fn validate(&self) -> Result<ResolvedRun, ConfigError> {
        let request = RankRequest::new(self.chain_length, self.target_min, self.target_max)?;
        let policy = RankPolicy {
            top_n: self.top_n,
            max_candidates: self.max_candidates,
        };
        policy.validate()?;

        let mut strategies = Vec::with_capacity(self.strategies.len());
        for name in &self.strategies {
            let strategy: Strategy = name.parse()?;
            if strategies.contains(&strategy) {
                return Err(ConfigError::DuplicateStrategy { name: name.clone() });
            }
            strategies.push(strategy);
        }
        if strategies.is_empty() {
            strategies.extend(Strategy::ALL);
        }
        strategies.sort();

        Ok(ResolvedRun {
            request,
            policy,
            strategies,
        })
    }

    /// Whether this run is expected to take a long time.
    #[must_use]
    pub fn is_long_search(&self) -> bool {
        self.chain_length > LONG_SEARCH_CHAIN_LENGTH
    }

    /// Canonical JSON snapshot of everything that affects results.
    ///
    /// `parallel` is excluded: it changes scheduling, never output. Target
    /// bounds are carried as exact bit patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Canon`] if canonical serialization fails.
    pub fn snapshot_bytes(&self, resolved: &[Strategy]) -> Result<Vec<u8>, ConfigError> {
        let value = serde_json::json!({
            "chain_length": self.chain_length,
            "max_candidates": self.max_candidates,
            "schema_version": "run_config.v1",
            "strategies": resolved.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "target_max_bits": f64_bits_hex(self.target_max),
            "target_min_bits": f64_bits_hex(self.target_min),
            "top_n": self.top_n,
        });
        canonical_json_bytes(&value).map_err(|e| ConfigError::Canon {
            detail: e.to_string(),
        })
    }
}
