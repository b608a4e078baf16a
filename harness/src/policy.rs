//! Policy configuration layered from environment variables.
//!
//! A base [`SearchPolicy`] is overridden field by field from:
//!
//! - `WAYPOINT_MAX_EXPANSIONS`: unsigned integer, or `none` to unbound
//! - `WAYPOINT_MAX_COST`: a cost value, or `none` to unbound
//! - `WAYPOINT_RECORD_TRACE`: `true`/`false`/`1`/`0`
//!
//! Unset variables leave the base value untouched. The merged policy is
//! validated before it is returned.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use tracing::debug;
use waypoint_kernel::cost::Cost;
use waypoint_search::error::SearchError;
use waypoint_search::policy::SearchPolicy;

pub const ENV_MAX_EXPANSIONS: &str = "WAYPOINT_MAX_EXPANSIONS";
pub const ENV_MAX_COST: &str = "WAYPOINT_MAX_COST";
pub const ENV_RECORD_TRACE: &str = "WAYPOINT_RECORD_TRACE";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("{var}={value:?} is not a valid value: {detail}")]
    BadValue {
        var: &'static str,
        value: String,
        detail: String,
    },
    #[error("cannot read policy file {path}: {detail}")]
    Io { path: String, detail: String },
    #[error(transparent)]
    Invalid(#[from] SearchError),
}

/// Apply environment overrides from the process environment.
///
/// # Errors
///
/// See [`apply_overrides`].
pub fn policy_from_env<C>(base: SearchPolicy<C>) -> Result<SearchPolicy<C>, PolicyConfigError>
where
    C: Cost + FromStr,
    C::Err: std::fmt::Display,
{
    apply_overrides(base, |var| std::env::var(var).ok())
}

/// Apply overrides looked up through `lookup`.
///
/// # Errors
///
/// Returns [`PolicyConfigError::BadValue`] if a variable does not parse, or
/// [`PolicyConfigError::Invalid`] if the merged policy fails validation.
pub fn apply_overrides<C, F>(
    mut policy: SearchPolicy<C>,
    lookup: F,
) -> Result<SearchPolicy<C>, PolicyConfigError>
where
    C: Cost + FromStr,
    C::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_MAX_EXPANSIONS) {
        policy.max_expansions = parse_optional(ENV_MAX_EXPANSIONS, &raw)?;
        debug!(max_expansions = ?policy.max_expansions, "policy override");
    }
    if let Some(raw) = lookup(ENV_MAX_COST) {
        policy.max_cost = parse_optional(ENV_MAX_COST, &raw)?;
        debug!(max_cost = ?policy.max_cost, "policy override");
    }
    if let Some(raw) = lookup(ENV_RECORD_TRACE) {
        policy.record_trace = parse_flag(&raw)?;
        debug!(record_trace = policy.record_trace, "policy override");
    }
    policy.validate()?;
    Ok(policy)
}

/// Load a JSON policy file, then apply environment overrides on top.
///
/// # Errors
///
/// Returns [`PolicyConfigError::Io`] if the file cannot be read, or any
/// error from parsing, overriding, or validation.
pub fn load_policy<C>(path: &Path) -> Result<SearchPolicy<C>, PolicyConfigError>
where
    C: Cost + FromStr + DeserializeOwned,
    C::Err: std::fmt::Display,
{
    load_policy_with(path, |var| std::env::var(var).ok())
}

fn load_policy_with<C, F>(path: &Path, lookup: F) -> Result<SearchPolicy<C>, PolicyConfigError>
where
    C: Cost + FromStr + DeserializeOwned,
    C::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let json = fs::read_to_string(path).map_err(|e| PolicyConfigError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    apply_overrides(SearchPolicy::from_json_str(&json)?, lookup)
}

fn parse_optional<T>(var: &'static str, raw: &str) -> Result<Option<T>, PolicyConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|e: T::Err| PolicyConfigError::BadValue {
        var,
        value: raw.to_owned(),
        detail: e.to_string(),
    })
}

fn parse_flag(raw: &str) -> Result<bool, PolicyConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(PolicyConfigError::BadValue {
            var: ENV_RECORD_TRACE,
            value: raw.to_owned(),
            detail: "expected true or false".to_owned(),
        }),
    }
}
