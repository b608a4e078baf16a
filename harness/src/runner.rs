//! Search runner: run a problem and render its artifacts.
//!
//! A run produces the in-memory [`SearchResult`] plus canonical bytes and
//! digests for the report, the policy, and (when recorded) the trace. Two
//! runs of the same problem under the same policy produce identical
//! artifacts.

use std::fmt::Debug;

use tracing::info;
use waypoint_kernel::cost::Cost;
use waypoint_kernel::heuristic::Heuristic;
use waypoint_kernel::problem::GraphProblem;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::ContentHash;
use waypoint_search::error::SearchError;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, SearchResult};

/// Canonical artifacts of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    pub report_json: Vec<u8>,
    pub report_digest: ContentHash,
    pub policy_json: Vec<u8>,
    pub policy_digest: ContentHash,
    /// Present only when the policy recorded a trace.
    pub trace_json: Option<Vec<u8>>,
    pub trace_digest: Option<ContentHash>,
}

/// A finished run: the raw result and its rendered artifacts.
#[derive(Debug, Clone)]
pub struct SearchRun<S, C> {
    pub result: SearchResult<S, C>,
    pub artifacts: RunArtifacts,
}

/// Error running a search through the harness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
}

/// Run `problem` under `policy`, with A* when `heuristic` is given and
/// uniform-cost search otherwise.
///
/// # Errors
///
/// Returns [`RunError::Search`] for any search failure, or
/// [`RunError::Canon`] if an artifact cannot be canonicalized.
pub fn run_search<P: GraphProblem + ?Sized>(
    problem: &P,
    heuristic: Option<&dyn Heuristic<P::State, P::Cost>>,
    policy: &SearchPolicy<P::Cost>,
) -> Result<SearchRun<P::State, P::Cost>, RunError> {
    let result = search(problem, heuristic, policy)?;
    let artifacts = render_artifacts(&result, policy)?;
    info!(
        problem = problem.name(),
        report = %artifacts.report_digest,
        traced = artifacts.trace_digest.is_some(),
        "run complete"
    );
    Ok(SearchRun { result, artifacts })
}

/// Render canonical artifacts for an existing result.
///
/// # Errors
///
/// Returns [`CanonError`] if any artifact contains a non-integer number.
pub fn render_artifacts<S: Clone + Debug, C: Cost>(
    result: &SearchResult<S, C>,
    policy: &SearchPolicy<C>,
) -> Result<RunArtifacts, CanonError> {
    let report = result.report();
    let report_json = report.to_canonical_json_bytes()?;
    let report_digest = report.digest()?;
    let policy_json = canonical_json_bytes(&policy.to_canonical_json())?;
    let policy_digest = policy.digest()?;
    let (trace_json, trace_digest) = match &result.trace {
        Some(trace) => (
            Some(trace.to_canonical_json_bytes()?),
            Some(trace.digest()?),
        ),
        None => (None, None),
    };
    Ok(RunArtifacts {
        report_json,
        report_digest,
        policy_json,
        policy_digest,
        trace_json,
        trace_digest,
    })
}
