//! Ratiochain Harness: multi-strategy orchestration and report artifacts.
//!
//! The harness runs the search crate's ranker once per strategy and
//! packages the results as a self-contained, digest-bound in-memory report.
//!
//! The harness does NOT score or rank; it delegates to `ratiochain_search`.
//! It owns run configuration, per-result statistics, switch-state export
//! codes and report assembly.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod details;
pub mod export;
pub mod report;
pub mod runner;
