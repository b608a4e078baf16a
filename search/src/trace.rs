//! `SearchTrace`: per-expansion audit log.
//!
//! The trace records, for every expansion, which node was popped, at what
//! priority, and what happened to each successor the problem produced. Two
//! runs of the same problem under the same policy must produce identical
//! traces; [`SearchTrace::digest`] makes that cheap to check.

use std::fmt::Debug;

use waypoint_kernel::cost::Cost;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};

/// The complete expansion log of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTrace<S, C> {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEvent<S, C>>,
}

/// A single frontier pop followed by a successor expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandEvent<S, C> {
    /// Position in the total order of expansions.
    pub expansion_order: u64,
    pub node_id: u64,
    pub state: S,
    /// Accumulated cost of the expanded node.
    pub g_cost: C,
    /// Frontier priority at pop time.
    pub pop_priority: C,
    /// Successors in the order the problem produced them.
    pub successors: Vec<SuccessorRecord<S, C>>,
}

/// A successor with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessorRecord<S, C> {
    pub state: S,
    pub operator_name: Option<String>,
    pub operator_cost: C,
    /// Accumulated cost the successor would have.
    pub g_cost: C,
    pub outcome: SuccessorOutcome,
}

/// What happened to a successor during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessorOutcome {
    /// A new node was created and pushed onto the frontier.
    Pushed { to_node: u64 },
    /// The state was already closed at an equal or lower cost.
    ClosedSuppressed,
    /// The state was already pushed at an equal or lower cost.
    DominatedSuppressed,
    /// The heuristic estimated the state as unreachable; no node was created.
    HeuristicPruned,
}

impl<S, C> SearchTrace<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expansions: Vec::new(),
        }
    }
}

impl<S, C> Default for SearchTrace<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Debug, C: Cost> SearchTrace<S, C> {
    /// Convert to a `serde_json::Value` suitable for canonical serialization.
    ///
    /// States render through their `Debug` representation.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
        })
    }

    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a cost type renders a non-integer JSON
    /// number.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Domain-separated SHA-256 digest of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from canonicalization.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }
}

fn expand_event_to_json<S: Debug, C: Cost>(e: &ExpandEvent<S, C>) -> serde_json::Value {
    serde_json::json!({
        "expansion_order": e.expansion_order,
        "g_cost": e.g_cost.to_canonical_json(),
        "node_id": e.node_id,
        "pop_priority": e.pop_priority.to_canonical_json(),
        "state": format!("{:?}", e.state),
        "successors": e.successors.iter().map(successor_to_json).collect::<Vec<_>>(),
    })
}

fn successor_to_json<S: Debug, C: Cost>(r: &SuccessorRecord<S, C>) -> serde_json::Value {
    serde_json::json!({
        "g_cost": r.g_cost.to_canonical_json(),
        "operator_cost": r.operator_cost.to_canonical_json(),
        "operator_name": r.operator_name,
        "outcome": outcome_to_json(r.outcome),
        "state": format!("{:?}", r.state),
    })
}

fn outcome_to_json(outcome: SuccessorOutcome) -> serde_json::Value {
    match outcome {
        SuccessorOutcome::Pushed { to_node } => {
            serde_json::json!({"type": "pushed", "to_node": to_node})
        }
        SuccessorOutcome::ClosedSuppressed => serde_json::json!({"type": "closed_suppressed"}),
        SuccessorOutcome::DominatedSuppressed => {
            serde_json::json!({"type": "dominated_suppressed"})
        }
        SuccessorOutcome::HeuristicPruned => serde_json::json!({"type": "heuristic_pruned"}),
    }
}
