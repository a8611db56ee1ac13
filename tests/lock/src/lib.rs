//! Shared helpers for the lock test suite.

pub mod ranking_helpers;
