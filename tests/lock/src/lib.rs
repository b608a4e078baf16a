//! Shared fixtures for the lock tests: scenario graphs, a seeded random
//! digraph generator, and a brute-force shortest-path oracle.

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use waypoint_harness::worlds::streets_map::StreetsMap;
use waypoint_harness::worlds::weighted_digraph::WeightedDigraph;

/// Workspace root, derived from this crate's manifest directory.
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

#[must_use]
pub fn fixture_map_path() -> PathBuf {
    workspace_root().join("tests/fixtures/streets_small.json")
}

/// Load the checked-in streets map fixture.
///
/// # Panics
///
/// Panics if the fixture is missing or malformed.
#[must_use]
pub fn fixture_map() -> Arc<StreetsMap> {
    let json = std::fs::read_to_string(fixture_map_path()).expect("fixture map readable");
    Arc::new(StreetsMap::from_json_str(&json).expect("fixture map valid"))
}

/// A -(1)-> B -(2)-> C, goal C.
#[must_use]
pub fn line_graph() -> WeightedDigraph {
    WeightedDigraph::new("line", "A")
        .edge("A", "B", 1.0)
        .edge("B", "C", 2.0)
        .goal("C")
}

/// Goal C exists but nothing leads to it.
#[must_use]
pub fn disconnected_graph() -> WeightedDigraph {
    WeightedDigraph::new("disconnected", "A")
        .edge("A", "B", 1.0)
        .edge("B", "A", 1.0)
        .goal("C")
}

/// Two routes to G of total cost 4. The route through X reaches G first.
///
/// ```text
/// S -1-> X -3-> G
/// S -2-> Y -2-> G
/// ```
#[must_use]
pub fn equal_cost_graph() -> WeightedDigraph {
    WeightedDigraph::new("equal-cost", "S")
        .edge("S", "X", 1.0)
        .edge("S", "Y", 2.0)
        .edge("X", "G", 3.0)
        .edge("Y", "G", 2.0)
        .goal("G")
}

/// Deterministic xorshift64* generator for reproducible random graphs.
#[derive(Debug, Clone)]
pub struct SeededRng(u64);

impl SeededRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `0..n`.
    pub fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// Random digraph over `n0..n{nodes-1}`, start `n0`, goal `n{nodes-1}`.
///
/// Edge costs are small integers (zero included) stored as `f64`, so sums
/// are exact.
#[must_use]
pub fn random_digraph(seed: u64, nodes: u64, edge_percent: u64) -> WeightedDigraph {
    let mut rng = SeededRng::new(seed);
    let label = |i: u64| format!("n{i}");
    let mut g = WeightedDigraph::new(format!("random(seed={seed})"), label(0)).goal(label(nodes - 1));
    for from in 0..nodes {
        for to in 0..nodes {
            if from != to && rng.below(100) < edge_percent {
                #[allow(clippy::cast_precision_loss)]
                let cost = rng.below(6) as f64;
                g = g.edge(&label(from), &label(to), cost);
            }
        }
    }
    g
}

/// Cheapest start-to-goal cost by exhaustive enumeration of simple paths.
///
/// Exponential; meant for graphs of a handful of nodes.
#[must_use]
pub fn brute_force_cheapest(graph: &WeightedDigraph, start: &str) -> Option<f64> {
    fn walk(
        graph: &WeightedDigraph,
        at: &str,
        cost: f64,
        on_path: &mut Vec<String>,
        best: &mut Option<f64>,
    ) {
        if graph.goals().contains(at) {
            *best = Some(best.map_or(cost, |b| b.min(cost)));
        }
        for edge in graph.out_edges(at).unwrap_or_default() {
            if on_path.contains(&edge.target) {
                continue;
            }
            on_path.push(edge.target.clone());
            walk(graph, &edge.target, cost + edge.cost, on_path, best);
            on_path.pop();
        }
    }

    let mut best = None;
    walk(graph, start, 0.0, &mut vec![start.to_owned()], &mut best);
    best
}
