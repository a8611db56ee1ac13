//! Proof module: canonical JSON and domain-separated hashing for report
//! artifacts.
//!
//! Depends on nothing else in the kernel; the harness routes every report
//! digest through here.

pub mod canon;
pub mod hash;
pub mod hash_domain;
