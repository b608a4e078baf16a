//! Waypoint Search: deterministic best-first search over `GraphProblem`s.
//!
//! This crate depends only on `waypoint_kernel`. It does NOT depend on
//! `waypoint_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search  ←  waypoint_harness
//! (problem, cost)     (frontier, nodes)    (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`search::search`]: the expansion loop (uniform-cost and A*)
//! - [`node::SearchNode`]: arena node with a parent index
//! - [`frontier::BestFirstFrontier`]: min-heap with FIFO tie-breaking
//! - [`visited::ClosedSet`]: expanded states in expansion order
//! - [`policy::SearchPolicy`]: cooperative limits and trace switch
//! - [`trace::SearchTrace`]: per-expansion audit log
//! - [`report::SearchReport`]: owned summary of a finished search

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;
pub mod trace;
pub mod visited;

pub use error::SearchError;
pub use policy::SearchPolicy;
pub use report::{SearchReport, SearchStatus};
pub use search::{astar_search, search, uniform_cost_search, SearchResult, Termination};
