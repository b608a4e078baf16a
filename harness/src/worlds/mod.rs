//! Concrete problems used by the harness, the lock tests, and benchmarks.

pub mod grid_maze;
pub mod streets_map;
pub mod weighted_digraph;
