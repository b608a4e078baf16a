//! Owned search summaries for CLIs, tests and artifact files.

use std::fmt;

use waypoint_kernel::cost::Cost;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_REPORT};

/// Outcome class of a finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Solved,
    /// No path exists. A normal outcome, not an error.
    Exhausted,
    /// A cooperative expansion or cost limit stopped the search.
    LimitExceeded,
}

impl SearchStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::Exhausted => "exhausted",
            Self::LimitExceeded => "limit_exceeded",
        }
    }
}

/// Success flag, total cost, ordered path and expansion count of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<S, C> {
    pub problem_name: String,
    pub algorithm: String,
    pub status: SearchStatus,
    pub total_cost: Option<C>,
    /// States from the initial state to the goal.
    pub path: Vec<S>,
    /// Operator labels along the path, one per transition.
    pub operator_names: Vec<Option<String>>,
    pub expansions: u64,
}

impl<S, C> SearchReport<S, C> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

impl<S: fmt::Debug, C: Cost> SearchReport<S, C> {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "algorithm": self.algorithm,
            "expansions": self.expansions,
            "operator_names": self.operator_names,
            "path": self.path.iter().map(|s| format!("{s:?}")).collect::<Vec<_>>(),
            "problem": self.problem_name,
            "status": self.status.as_str(),
            "total_cost": self.total_cost.as_ref().map(Cost::to_canonical_json),
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if the cost type renders a non-integer number.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// Propagates [`CanonError`] from canonicalization.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_REPORT, &bytes))
    }
}

impl<S: fmt::Debug, C: fmt::Debug> fmt::Display for SearchReport<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<35} {:<10} #dev: {:>5}  ",
            self.problem_name, self.algorithm, self.expansions
        )?;
        match (&self.status, &self.total_cost) {
            (SearchStatus::Solved, Some(cost)) => {
                write!(f, "total_cost: {cost:?}  |path|: {}  path: [", self.path.len())?;
                for (i, state) in self.path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{state:?}")?;
                }
                f.write_str("]")
            }
            (SearchStatus::LimitExceeded, _) => f.write_str("LIMIT EXCEEDED"),
            _ => f.write_str("NO SOLUTION FOUND"),
        }
    }
}
