//! Waypoint harness: concrete problems and run orchestration.
//!
//! The harness runs a problem through the search engine, renders the
//! report, policy and trace as canonical artifacts, and persists them to a
//! run directory. It does not implement search logic; it delegates to
//! `waypoint-search`. Worlds provide problem data only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod policy;
pub mod run_dir;
pub mod runner;
pub mod worlds;

pub use runner::{run_search, RunArtifacts, RunError, SearchRun};
