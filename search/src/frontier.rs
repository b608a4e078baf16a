//! Best-first frontier over arena node ids.
//!
//! The frontier holds keys only; nodes live in the search arena. Entries are
//! never removed or re-keyed in place: when a cheaper path to a state is
//! found the new node is pushed alongside the old one, and the old entry is
//! discarded lazily when it is popped after its state has been closed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use waypoint_kernel::cost::Cost;

use crate::node::FrontierKey;

/// Best-first frontier manager.
///
/// `BinaryHeap` is a max-heap, so keys are wrapped in `Reverse` to pop the
/// lowest `(priority, creation_order)` first.
#[derive(Debug)]
pub struct BestFirstFrontier<C: Cost> {
    heap: BinaryHeap<Reverse<FrontierKey<C>>>,
    high_water: usize,
    total_pushed: u64,
}

impl<C: Cost> BestFirstFrontier<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
            total_pushed: 0,
        }
    }

    pub fn push(&mut self, key: FrontierKey<C>) {
        self.heap.push(Reverse(key));
        self.total_pushed += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Pop the best key: lowest priority, oldest on ties.
    #[must_use]
    pub fn pop(&mut self) -> Option<FrontierKey<C>> {
        self.heap.pop().map(|Reverse(key)| key)
    }

    /// Peek at the best key without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&FrontierKey<C>> {
        self.heap.peek().map(|Reverse(key)| key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Number of pushes since construction, stale entries included.
    #[must_use]
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }
}

impl<C: Cost> Default for BestFirstFrontier<C> {
    fn default() -> Self {
        Self::new()
    }
}
