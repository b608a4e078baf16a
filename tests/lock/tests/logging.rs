//! Structured logging: the engine emits `tracing` events at every level
//! without changing its results.

use lock_tests::{equal_cost_graph, fixture_map};
use tracing_subscriber::EnvFilter;
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::streets_map::MapProblem;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::uniform_cost_search;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("waypoint_search=trace,waypoint_harness=debug"))
        .with_test_writer()
        .try_init();
}

#[test]
fn search_under_trace_subscriber_is_unchanged() {
    let plain = uniform_cost_search(&equal_cost_graph(), &SearchPolicy::default()).unwrap();
    init_tracing();
    let logged = uniform_cost_search(&equal_cost_graph(), &SearchPolicy::default()).unwrap();
    assert_eq!(plain.stats, logged.stats);
    assert_eq!(plain.path(), logged.path());
}

#[test]
fn runner_logs_and_completes() {
    init_tracing();
    let run = run_search(&MapProblem::new(fixture_map(), 0, 5), None, &SearchPolicy::default())
        .unwrap();
    assert!(run.result.is_goal_reached());
}
