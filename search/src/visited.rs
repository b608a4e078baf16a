//! Visited-state bookkeeping: the closed set and the best-cost table.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;
use waypoint_kernel::cost::Cost;

/// States already expanded, with the cost at which each was expanded.
///
/// Backed by an `IndexMap` so iteration follows expansion order, which keeps
/// reports deterministic regardless of hashing.
#[derive(Debug, Clone)]
pub struct ClosedSet<S, C> {
    closed: IndexMap<S, C>,
}

impl<S: Eq + Hash, C: Cost> ClosedSet<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            closed: IndexMap::new(),
        }
    }

    /// Whether `state` was expanded at a cost no greater than `cost`.
    #[must_use]
    pub fn is_closed_at_or_below(&self, state: &S, cost: &C) -> bool {
        self.closed
            .get(state)
            .is_some_and(|closed_at| closed_at.cmp_cost(cost) != Ordering::Greater)
    }

    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.closed.contains_key(state)
    }

    /// Mark `state` as expanded at `cost`.
    ///
    /// A state that is already closed is only re-closed (reopened) at a
    /// strictly cheaper cost. Returns whether the recorded cost changed.
    pub fn close(&mut self, state: S, cost: C) -> bool {
        match self.closed.entry(state) {
            indexmap::map::Entry::Occupied(mut slot) => {
                if cost.cmp_cost(slot.get()) == Ordering::Less {
                    *slot.get_mut() = cost;
                    true
                } else {
                    false
                }
            }
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(cost);
                true
            }
        }
    }

    #[must_use]
    pub fn cost_of(&self, state: &S) -> Option<&C> {
        self.closed.get(state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.closed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty()
    }

    /// Expanded states in expansion order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &C)> {
        self.closed.iter()
    }
}

impl<S: Eq + Hash, C: Cost> Default for ClosedSet<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheapest accumulated cost at which each state has been pushed.
///
/// A successor that is not strictly cheaper than the recorded cost is
/// dominated: on an equal cost the earlier discovery is kept.
#[derive(Debug, Clone)]
pub struct BestCostTable<S, C> {
    best: HashMap<S, C>,
}

impl<S: Eq + Hash, C: Cost> BestCostTable<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
        }
    }

    /// Record `cost` for `state` if it improves on the known best.
    ///
    /// Returns `true` when the cost was recorded (strict improvement or first
    /// sighting), `false` when the candidate is dominated.
    pub fn improve(&mut self, state: S, cost: C) -> bool {
        match self.best.get_mut(&state) {
            Some(best) if cost.cmp_cost(best) != Ordering::Less => false,
            Some(best) => {
                *best = cost;
                true
            }
            None => {
                self.best.insert(state, cost);
                true
            }
        }
    }

    #[must_use]
    pub fn best(&self, state: &S) -> Option<&C> {
        self.best.get(state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

impl<S: Eq + Hash, C: Cost> Default for BestCostTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
