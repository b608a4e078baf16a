//! Search nodes and the frontier ordering key.

use std::cmp::Ordering;

use waypoint_kernel::cost::Cost;

/// An immutable node in the search arena.
///
/// Nodes are stored in a `Vec` indexed by `node_id`; `parent_id` points back
/// into the same arena, so back-pointer chains form a tree without any
/// shared ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode<S, C> {
    /// Arena index. Also the creation order used for tie-breaking.
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    pub state: S,
    /// Accumulated path cost from the root, starting at the problem's zero.
    pub g_cost: C,
    /// Heuristic estimate, when a heuristic is in use.
    pub h_cost: Option<C>,
    /// Frontier priority: `g_cost + h_cost`, or `g_cost` alone.
    pub f_cost: C,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Cost of the operator that produced this node (`None` for root).
    pub operator_cost: Option<C>,
    /// Label of the operator that produced this node, if the problem named it.
    pub operator_name: Option<String>,
}

impl<S, C: Cost> SearchNode<S, C> {
    /// The ordering key of this node in the frontier.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey<C> {
        FrontierKey {
            priority: self.f_cost,
            creation_order: self.node_id,
        }
    }
}

/// The frontier ordering key: `(priority, creation_order)`.
///
/// Lower priority first; on equal priority the older node (smaller
/// `creation_order`) first, which makes the frontier FIFO among ties.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey<C> {
    pub priority: C,
    pub creation_order: u64,
}

impl<C: Cost> PartialEq for FrontierKey<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Cost> Eq for FrontierKey<C> {}

impl<C: Cost> PartialOrd for FrontierKey<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Cost> Ord for FrontierKey<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp_cost(&other.priority)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
