//! Waypoint Kernel: the problem-side contract of Waypoint search.
//!
//! The kernel defines what a search problem is, independent of any search
//! algorithm:
//!
//! - [`problem::GraphProblem`] -- initial state, goal test, lazy successor
//!   expansion, and the zero of the problem's cost algebra
//! - [`cost::Cost`] -- additive, totally ordered cost values
//! - [`heuristic::Heuristic`] -- optional remaining-cost estimates
//! - [`proof`] -- canonical JSON bytes and domain-separated SHA-256 digests
//!
//! # Module Dependency Direction
//!
//! `cost` ← `heuristic`, `cost` ← `problem`; `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cost;
pub mod heuristic;
pub mod problem;
pub mod proof;

pub use cost::Cost;
pub use heuristic::Heuristic;
pub use problem::{GraphProblem, OperatorResult, ProblemError, Successors};
