//! Ratiochain Kernel: the deterministic core of the gear-ratio chain search.
//!
//! # API Surface
//!
//! - [`carrier::option::generate_options`] -- every single-stage gearbox option
//! - [`carrier::chain::ChainSpace`] -- lazy combinations-with-replacement of options
//! - [`carrier::expand::detailed_ratios`] -- all 2^N switch states of a chain
//! - [`carrier::sequence::main_sequence`] -- greedy near-duplicate merge
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 for artifacts
//!
//! # Module Dependency Direction
//!
//! `carrier` and `proof` are independent. `carrier` never hashes; `proof`
//! knows nothing about chains and only serializes and hashes bytes.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod error;
pub mod proof;
