//! Typed search errors.
//!
//! `SearchError` covers pre-flight policy failures and fatal failures raised
//! while calling into the problem. Normal terminations (goal reached,
//! frontier exhausted, limits hit) are expressed via
//! [`crate::search::Termination`] and never as errors.

use waypoint_kernel::problem::ProblemError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The policy was rejected before any search step was taken.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    /// The problem failed while being expanded or goal-tested.
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// A successor carried a negative or non-finite operator cost.
    #[error("{problem}: invalid operator cost: {detail}")]
    InvalidOperatorCost { problem: String, detail: String },
    /// A heuristic estimate was negative or NaN.
    #[error("{problem}: invalid heuristic estimate: {detail}")]
    InvalidHeuristic { problem: String, detail: String },
    /// Accumulating a path cost overflowed the cost type.
    #[error("cost overflow: {detail}")]
    CostOverflow { detail: String },
}
