//! Multi-stage chains and the lazy chain space.
//!
//! The chain space is every multiset of `N` options drawn with repetition
//! from the option universe, enumerated as non-decreasing index tuples in
//! lexicographic order. Nothing is materialized beyond the current index
//! tuple, so very large spaces iterate in constant memory.

use crate::carrier::option::GearboxOption;
use crate::error::KernelError;

/// Longest chain the kernel will build.
///
/// Expansion materializes `2^N` samples per chain; at this cap that is
/// 65 536 samples, and the chain space over the standard catalog already
/// exceeds 10^14 candidates.
pub const MAX_CHAIN_STAGES: usize = 16;

fn check_length(len: usize) -> Result<(), KernelError> {
    if len == 0 {
        return Err(KernelError::EmptyChain);
    }
    if len > MAX_CHAIN_STAGES {
        return Err(KernelError::ChainTooLong {
            len,
            max: MAX_CHAIN_STAGES,
        });
    }
    Ok(())
}

/// An ordered sequence of stages. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    stages: Vec<GearboxOption>,
}

impl Chain {
    /// Build a chain from explicit stages.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::EmptyChain`] if `stages` is empty and
    /// [`KernelError::ChainTooLong`] above [`MAX_CHAIN_STAGES`].
    pub fn new(stages: Vec<GearboxOption>) -> Result<Self, KernelError> {
        check_length(stages.len())?;
        Ok(Self { stages })
    }

    #[must_use]
    pub fn stages(&self) -> &[GearboxOption] {
        &self.stages
    }

    /// Number of stages (`N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Number of switch combinations, `2^N` (saturating at `u64::MAX`).
    #[must_use]
    pub fn state_count(&self) -> u64 {
        u32::try_from(self.stages.len())
            .ok()
            .and_then(|n| 1u64.checked_shl(n))
            .unwrap_or(u64::MAX)
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

/// `C(k + n - 1, n)`: multisets of size `n` over `k` items, saturating at `u64::MAX`.
#[must_use]
pub fn combinations_with_replacement_count(k: usize, n: usize) -> u64 {
    if n == 0 {
        return 1;
    }
    if k == 0 {
        return 0;
    }
    // Multiplicative form keeps every intermediate an exact integer:
    // r_i = r_{i-1} * (k - 1 + i) / i.
    let mut r: u128 = 1;
    for i in 1..=n as u128 {
        let Some(next) = r.checked_mul(k as u128 - 1 + i) else {
            return u64::MAX;
        };
        r = next / i;
    }
    u64::try_from(r).unwrap_or(u64::MAX)
}

/// Lazy iterator over every chain of length `chain_length`.
///
/// Restartable: constructing a new `ChainSpace` over the same options
/// yields the identical sequence.
#[derive(Debug, Clone)]
pub struct ChainSpace<'a> {
    options: &'a [GearboxOption],
    indices: Vec<usize>,
    remaining: u64,
    done: bool,
}

impl<'a> ChainSpace<'a> {
    /// Prepare the chain space over `options`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::EmptyChain`] if `chain_length` is zero and
    /// [`KernelError::ChainTooLong`] above [`MAX_CHAIN_STAGES`].
    pub fn new(options: &'a [GearboxOption], chain_length: usize) -> Result<Self, KernelError> {
        check_length(chain_length)?;
        Ok(Self {
            options,
            indices: vec![0; chain_length],
            remaining: combinations_with_replacement_count(options.len(), chain_length),
            done: options.is_empty(),
        })
    }

    /// Total number of chains in the space.
    #[must_use]
    pub fn candidate_count(&self) -> u64 {
        combinations_with_replacement_count(self.options.len(), self.indices.len())
    }

    /// Advance `indices` to the next non-decreasing tuple.
    fn advance(&mut self) {
        let top = self.options.len() - 1;
        let Some(pos) = self.indices.iter().rposition(|&i| i != top) else {
            self.done = true;
            return;
        };
        let next = self.indices[pos] + 1;
        for slot in &mut self.indices[pos..] {
            *slot = next;
        }
    }
}

impl Iterator for ChainSpace<'_> {
    type Item = Chain;

    fn next(&mut self) -> Option<Chain> {
        if self.done {
            return None;
        }
        let stages = self.indices.iter().map(|&i| self.options[i]).collect();
        self.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(Chain { stages })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) if self.remaining != u64::MAX => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}
