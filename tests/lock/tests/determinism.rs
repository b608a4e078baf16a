//! In-process determinism: repeated runs produce identical paths, costs,
//! expansion counts, traces, and artifact digests.

use std::sync::Arc;

use lock_tests::{equal_cost_graph, fixture_map, random_digraph};
use waypoint_harness::run_dir::{read_run_dir, write_run_dir};
use waypoint_harness::runner::run_search;
use waypoint_harness::worlds::streets_map::{AirDistanceHeuristic, MapProblem};
use waypoint_kernel::heuristic::Heuristic;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::uniform_cost_search;

#[test]
fn repeated_searches_are_identical_n10() {
    let g = random_digraph(7, 9, 35);
    let policy = SearchPolicy::default().with_trace(true);
    let first = uniform_cost_search(&g, &policy).unwrap();
    let first_trace = first.trace.as_ref().unwrap().to_canonical_json_bytes().unwrap();

    for _ in 1..10 {
        let again = uniform_cost_search(&g, &policy).unwrap();
        assert_eq!(again.path(), first.path());
        assert_eq!(again.total_cost(), first.total_cost());
        assert_eq!(again.stats, first.stats);
        assert_eq!(again.termination, first.termination);
        let trace = again.trace.as_ref().unwrap().to_canonical_json_bytes().unwrap();
        assert_eq!(trace, first_trace);
    }
}

#[test]
fn same_problem_instance_reused_across_runs() {
    let problem = MapProblem::new(fixture_map(), 0, 5);
    let h = AirDistanceHeuristic::new(&problem);
    let policy = SearchPolicy::default();
    let a = run_search(&problem, Some(&h as &dyn Heuristic<_, _>), &policy).unwrap();
    let b = run_search(&problem, Some(&h as &dyn Heuristic<_, _>), &policy).unwrap();
    assert_eq!(a.artifacts, b.artifacts);
    assert_eq!(a.result.stats.expansions, b.result.stats.expansions);
}

#[test]
fn shared_map_gives_same_answer_to_independent_problems() {
    let map = fixture_map();
    let a = MapProblem::new(Arc::clone(&map), 0, 5);
    let b = MapProblem::new(Arc::clone(&map), 0, 5);
    let policy = SearchPolicy::default().with_trace(true);
    let ra = run_search(&a, None, &policy).unwrap();
    let rb = run_search(&b, None, &policy).unwrap();
    assert_eq!(ra.artifacts.report_digest, rb.artifacts.report_digest);
    assert_eq!(ra.artifacts.trace_digest, rb.artifacts.trace_digest);
}

#[test]
fn trace_digest_distinguishes_different_searches() {
    let policy = SearchPolicy::default().with_trace(true);
    let a = run_search(&random_digraph(1, 8, 30), None, &policy).unwrap();
    let b = run_search(&random_digraph(2, 9, 30), None, &policy).unwrap();
    assert_ne!(a.artifacts.trace_digest, b.artifacts.trace_digest);
}

#[test]
fn trace_records_dominated_tie() {
    let policy = SearchPolicy::default().with_trace(true);
    let result = uniform_cost_search(&equal_cost_graph(), &policy).unwrap();
    let json = result.trace.as_ref().unwrap().to_json_value();
    let text = json.to_string();
    assert!(text.contains(r#""type":"dominated_suppressed""#), "{text}");
}

#[test]
fn run_directory_round_trips_across_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let problem = MapProblem::new(fixture_map(), 0, 5);
    let policy = SearchPolicy::default().with_max_expansions(100);

    let first = run_search(&problem, None, &policy).unwrap();
    write_run_dir(&first.artifacts, tmp.path()).unwrap();

    let second = run_search(&problem, None, &policy).unwrap();
    assert_eq!(read_run_dir(tmp.path()).unwrap(), second.artifacts);
}

#[test]
fn report_artifact_is_readable_json() {
    let problem = MapProblem::new(fixture_map(), 0, 5);
    let run = run_search(&problem, None, &SearchPolicy::default()).unwrap();
    let report: serde_json::Value = serde_json::from_slice(&run.artifacts.report_json).unwrap();

    assert_eq!(report["status"], "solved");
    assert_eq!(report["problem"], "StreetsMap(src: 0 dst: 5)");
    assert_eq!(report["algorithm"], "UniformCost");
    assert_eq!(report["expansions"], run.result.stats.expansions);
    assert_eq!(report["path"].as_array().map(Vec::len), Some(4));
}
