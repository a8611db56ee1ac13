//! Bounded top-K frontier with deterministic tie-breaking.
//!
//! Keeps the `K` lowest `(score, enumeration_order)` keys seen so far in a
//! `BinaryHeap` max-heap, so the current worst entry is always on top and
//! memory stays `O(K)` regardless of the size of the chain space.
//!
//! Scores compare with `f64::total_cmp`; equal scores fall back to
//! enumeration order, so an earlier chain is never displaced by a later one
//! with the same score.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::scorer::ScoredChain;

/// Frontier ordering key. Lower is better.
#[derive(Debug, Clone, Copy)]
pub struct RankKey {
    pub score: f64,
    pub order: u64,
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.order.cmp(&other.order))
    }
}

#[derive(Debug)]
struct FrontierEntry {
    key: RankKey,
    item: ScoredChain,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-K selection over a stream of scored chains.
#[derive(Debug)]
pub struct TopKFrontier {
    capacity: usize,
    heap: BinaryHeap<FrontierEntry>,
    high_water: usize,
}

impl TopKFrontier {
    /// Create an empty frontier keeping at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)),
            high_water: 0,
        }
    }

    /// Offer a scored chain produced at enumeration position `order`.
    ///
    /// Returns `true` if the chain was admitted. Callers must offer in
    /// increasing `order` for the tie-break to match enumeration order.
    pub fn offer(&mut self, order: u64, item: ScoredChain) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let key = RankKey {
            score: item.score,
            order,
        };
        if self.heap.len() == self.capacity {
            match self.heap.peek() {
                Some(worst) if key < worst.key => {
                    self.heap.pop();
                }
                _ => return false,
            }
        }
        self.heap.push(FrontierEntry { key, item });
        self.high_water = self.high_water.max(self.heap.len());
        true
    }

    /// Key of the entry that would be evicted next.
    #[must_use]
    pub fn worst_key(&self) -> Option<RankKey> {
        self.heap.peek().map(|e| e.key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Drain into a vector sorted best-first.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<ScoredChain> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| e.item)
            .collect()
    }
}
