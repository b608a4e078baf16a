//! Search policy: limits and recording options.
//!
//! Policies deserialize from JSON so callers can keep them in configuration
//! files. Every field is optional in JSON; missing fields take the defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use waypoint_kernel::cost::Cost;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY};

use crate::error::SearchError;

/// Search limits and trace configuration.
///
/// Limits are cooperative: they are checked once per loop iteration and,
/// when hit, end the search with a dedicated termination distinct from
/// frontier exhaustion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy<C> {
    /// Hard cap on node expansions. `None` means unbounded.
    pub max_expansions: Option<u64>,
    /// Abort once the cheapest frontier priority exceeds this bound.
    pub max_cost: Option<C>,
    /// Record a per-expansion [`crate::trace::SearchTrace`]. Off by default:
    /// the trace holds one record per generated successor, so its memory
    /// grows with the whole exploration.
    pub record_trace: bool,
}

impl<C> Default for SearchPolicy<C> {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_cost: None,
            record_trace: false,
        }
    }
}

impl<C: Cost> SearchPolicy<C> {
    /// Builder-style expansion cap.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Builder-style cost bound.
    #[must_use]
    pub fn with_max_cost(mut self, max_cost: C) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    #[must_use]
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Validate the policy before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the cost bound is negative or
    /// not finite.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(bound) = &self.max_cost {
            if !bound.is_valid_step() {
                return Err(SearchError::InvalidPolicy {
                    detail: format!("max_cost must be finite and non-negative, got {bound:?}"),
                });
            }
        }
        Ok(())
    }

    /// Canonical JSON rendering of the policy.
    #[must_use]
    pub fn to_canonical_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_cost": self.max_cost.as_ref().map(Cost::to_canonical_json),
            "max_expansions": self.max_expansions,
            "record_trace": self.record_trace,
        })
    }

    /// Domain-separated digest of the policy, for binding reports to the
    /// policy that produced them.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from canonicalization.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_canonical_json())?;
        Ok(canonical_hash(DOMAIN_SEARCH_POLICY, &bytes))
    }
}

impl<C: Cost + DeserializeOwned> SearchPolicy<C> {
    /// Parse and validate a policy from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] on malformed JSON, unknown
    /// fields, or a policy that fails [`SearchPolicy::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let policy: Self = serde_json::from_str(json).map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })?;
        policy.validate()?;
        Ok(policy)
    }
}
