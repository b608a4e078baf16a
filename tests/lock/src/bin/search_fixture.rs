//! Binary that routes across a streets map through the harness runner and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture <map.json> <source> <target>`
//!
//! The search policy records a trace unless overridden, and honours the
//! `WAYPOINT_*` environment overrides.
//!
//! Output: key=value lines (see source for format).

use std::sync::Arc;

use waypoint_harness::policy::policy_from_env;
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::streets_map::{AirDistanceHeuristic, MapProblem, StreetsMap};
use waypoint_kernel::heuristic::Heuristic;
use waypoint_search::policy::SearchPolicy;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    assert!(
        args.len() == 4,
        "usage: search_fixture <map.json> <source> <target>"
    );
    let json = std::fs::read_to_string(&args[1]).expect("cannot read map file");
    let map = Arc::new(StreetsMap::from_json_str(&json).expect("invalid map"));
    let source: u32 = args[2].parse().expect("source must be a junction index");
    let target: u32 = args[3].parse().expect("target must be a junction index");

    let problem = MapProblem::new(map, source, target);
    let heuristic = AirDistanceHeuristic::new(&problem);
    let policy = policy_from_env(SearchPolicy::default().with_trace(true)).expect("invalid policy environment");

    let run = run_search(
        &problem,
        Some(&heuristic as &dyn Heuristic<_, _>),
        &policy,
    )
    .expect("search run failed");
    let report = run.result.report();

    let path: Vec<String> = report
        .path
        .iter()
        .map(|s| s.junction_id.to_string())
        .collect();
    let total_cost = report
        .total_cost
        .map_or_else(|| "none".to_owned(), |c| format!("{c:?}"));
    let trace_digest = run
        .artifacts
        .trace_digest
        .as_ref()
        .map_or("none", |d| d.as_str());

    println!("problem={}", report.problem_name);
    println!("status={}", report.status.as_str());
    println!("total_cost={total_cost}");
    println!("path={}", path.join(","));
    println!("expansions={}", report.expansions);
    println!("report_digest={}", run.artifacts.report_digest.as_str());
    println!("policy_digest={}", run.artifacts.policy_digest.as_str());
    println!("trace_digest={trace_digest}");
}
