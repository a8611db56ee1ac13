//! Ratiochain Search: strategy scoring and deterministic top-K ranking over
//! the chain space.
//!
//! This crate depends only on `ratiochain_kernel`; it does NOT depend on
//! `ratiochain_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! ratiochain_kernel  ←  ratiochain_search  ←  ratiochain_harness
//! (catalog, chains)     (scorer, ranker)      (runs, reports)
//! ```
//!
//! # Key types
//!
//! - [`Strategy`](strategy::Strategy): closed catalog of weighting profiles
//! - [`ChainScorer`](scorer::ChainScorer): trait for chain scoring
//! - [`TopKFrontier`](frontier::TopKFrontier): bounded best-K selection
//! - [`RankPolicy`](policy::RankPolicy): result cap and candidate budget
//! - [`rank`](rank::rank): the exhaustive ranking loop

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod policy;
pub mod rank;
pub mod scorer;
pub mod strategy;
