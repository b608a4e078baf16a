//! Search problem contract.
//!
//! A [`GraphProblem`] describes an implicit graph: where it starts, which
//! states are goals, and how to enumerate a state's successors together with
//! the cost of reaching them. Search algorithms consume this trait and never
//! see concrete domain types.

use std::fmt::Debug;
use std::hash::Hash;

use crate::cost::Cost;

/// Typed failure raised by a problem while the engine is calling into it.
///
/// Both variants are fatal for the running search: the engine propagates
/// them immediately and does not retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProblemError {
    /// A state that this problem instance does not recognise was passed to
    /// `expand_state_with_costs` or `is_goal`.
    #[error("{problem}: invalid state: {detail}")]
    InvalidState { problem: String, detail: String },
    /// The problem produced successor data it cannot stand behind (for
    /// example a link pointing at a missing junction).
    #[error("{problem}: malformed successor: {detail}")]
    MalformedSuccessor { problem: String, detail: String },
}

/// The result of applying one operator to a state.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorResult<S, C> {
    /// The state reached by the operator.
    pub successor_state: S,
    /// Incremental cost of the transition.
    pub operator_cost: C,
    /// Optional human-readable operator label.
    pub operator_name: Option<String>,
}

impl<S, C> OperatorResult<S, C> {
    #[must_use]
    pub fn new(successor_state: S, operator_cost: C) -> Self {
        Self {
            successor_state,
            operator_cost,
            operator_name: None,
        }
    }

    /// Attach an operator label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.operator_name = Some(name.into());
        self
    }
}

/// Lazily produced successors of one state.
///
/// Each item is pulled on demand; an `Err` item aborts the search.
pub type Successors<'a, S, C> = Box<dyn Iterator<Item = Result<OperatorResult<S, C>, ProblemError>> + 'a>;

/// A problem over an implicit graph.
///
/// # Contract
///
/// - `expand_state_with_costs` must be deterministic: the same state yields
///   the same successors in the same order on every call.
/// - `is_goal` is a pure predicate.
/// - Operator costs must be valid steps ([`Cost::is_valid_step`]) for
///   priority-based search to be optimal; the engine rejects invalid ones.
pub trait GraphProblem {
    /// A node of the implicit graph. Identity is value equality.
    type State: Clone + Eq + Hash + Debug;
    /// The problem's cost algebra.
    type Cost: Cost;

    /// Human-readable problem name, used in logs and reports.
    fn name(&self) -> &str;

    /// The state the search starts from. Fixed per problem instance.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the goal.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::InvalidState`] if `state` is foreign to this
    /// problem instance.
    fn is_goal(&self, state: &Self::State) -> Result<bool, ProblemError>;

    /// Enumerate the successors of `state` with their operator costs.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::InvalidState`] if `state` is foreign to this
    /// problem instance. Individual items may carry
    /// [`ProblemError::MalformedSuccessor`].
    fn expand_state_with_costs<'a>(
        &'a self,
        state: &'a Self::State,
    ) -> Result<Successors<'a, Self::State, Self::Cost>, ProblemError>;

    /// The additive identity of this problem's cost algebra.
    fn zero_cost(&self) -> Self::Cost {
        Self::Cost::zero()
    }
}
