//! End-to-end search scenarios: line graph, disconnected target, equal-cost
//! tie-break, and cost-function override on a streets map.

use std::sync::Arc;

use lock_tests::{disconnected_graph, equal_cost_graph, fixture_map, line_graph};
use waypoint_harness::worlds::streets_map::{Link, MapProblem};
use waypoint_kernel::problem::GraphProblem;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::report::SearchStatus;
use waypoint_search::search::{uniform_cost_search, Termination};

fn labels(path: &[&String]) -> Vec<String> {
    path.iter().map(|s| (*s).clone()).collect()
}

// ---------------------------------------------------------------------------
// Scenario A: line graph
// ---------------------------------------------------------------------------

#[test]
fn line_graph_finds_full_path() {
    let result = uniform_cost_search(&line_graph(), &SearchPolicy::default()).unwrap();

    assert!(result.is_goal_reached());
    assert_eq!(labels(&result.path()), vec!["A", "B", "C"]);
    assert_eq!(result.total_cost(), Some(3.0));
    assert_eq!(result.stats.expansions, 2);
    assert_eq!(result.operator_names(), vec![Some("A->B"), Some("B->C")]);
}

#[test]
fn line_graph_report_summarises_result() {
    let report = uniform_cost_search(&line_graph(), &SearchPolicy::default())
        .unwrap()
        .report();

    assert_eq!(report.status, SearchStatus::Solved);
    assert!(report.is_solved());
    assert_eq!(report.total_cost, Some(3.0));
    assert_eq!(report.path, vec!["A", "B", "C"]);
    assert_eq!(report.expansions, 2);
    assert_eq!(report.algorithm, "UniformCost");
}

// ---------------------------------------------------------------------------
// Scenario B: disconnected target
// ---------------------------------------------------------------------------

#[test]
fn disconnected_target_exhausts_without_error() {
    let result = uniform_cost_search(&disconnected_graph(), &SearchPolicy::default()).unwrap();

    assert_eq!(result.termination, Termination::FrontierExhausted);
    assert!(result.is_exhausted());
    assert!(result.path().is_empty());
    assert_eq!(result.total_cost(), None);
    assert_eq!(result.stats.expansions, 2);

    let report = result.report();
    assert_eq!(report.status, SearchStatus::Exhausted);
    assert!(report.to_string().contains("NO SOLUTION FOUND"));
}

#[test]
fn isolated_map_junction_exhausts() {
    let problem = MapProblem::new(fixture_map(), 0, 6);
    let result = uniform_cost_search(&problem, &SearchPolicy::default()).unwrap();
    assert!(result.is_exhausted());
    // Every junction reachable from 0 is expanded exactly once.
    assert_eq!(result.stats.expansions, 6);
}

// ---------------------------------------------------------------------------
// Scenario C: equal-cost tie-break
// ---------------------------------------------------------------------------

#[test]
fn equal_cost_paths_keep_earlier_discovery() {
    let result = uniform_cost_search(&equal_cost_graph(), &SearchPolicy::default()).unwrap();

    assert_eq!(result.total_cost(), Some(4.0));
    assert_eq!(labels(&result.path()), vec!["S", "X", "G"]);
    assert_eq!(result.stats.dominated_suppressed, 1);
}

#[test]
fn equal_priority_nodes_pop_in_insertion_order() {
    // Three equal-cost siblings; none is a goal, so all are expanded in the
    // order they were generated.
    let g = waypoint_harness::worlds::weighted_digraph::WeightedDigraph::new("fan", "R")
        .edge("R", "c", 1.0)
        .edge("R", "a", 1.0)
        .edge("R", "b", 1.0)
        .goal("unreachable");
    let result = uniform_cost_search(&g, &SearchPolicy::default().with_trace(true)).unwrap();
    let order: Vec<&str> = result
        .trace
        .as_ref()
        .unwrap()
        .expansions
        .iter()
        .map(|e| e.state.as_str())
        .collect();
    assert_eq!(order, vec!["R", "c", "a", "b"]);
}

// ---------------------------------------------------------------------------
// Scenario D: cost override
// ---------------------------------------------------------------------------

fn travel_time(link: &Link) -> f64 {
    link.distance / link.max_speed.unwrap_or(1.0)
}

#[test]
fn default_weights_route_through_the_middle() {
    let problem = MapProblem::new(fixture_map(), 0, 5);
    let result = uniform_cost_search(&problem, &SearchPolicy::default()).unwrap();
    let ids: Vec<u32> = result.path().iter().map(|s| s.junction_id).collect();
    assert_eq!(ids, vec![0, 1, 4, 5]);
    assert_eq!(result.total_cost(), Some(3.0));
}

#[test]
fn cost_override_replaces_default_weights() {
    let problem = MapProblem::new(fixture_map(), 0, 5).with_road_cost_fn(Arc::new(travel_time));
    let result = uniform_cost_search(&problem, &SearchPolicy::default()).unwrap();

    let ids: Vec<u32> = result.path().iter().map(|s| s.junction_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 5]);
    let expected = 1.0 / 50.0 + 1.0 / 50.0 + 3.0 / 100.0;
    assert_eq!(result.total_cost(), Some(expected));
    assert_ne!(result.total_cost(), Some(5.0));
}

#[test]
fn map_problem_is_named_after_endpoints() {
    let problem = MapProblem::new(fixture_map(), 0, 5);
    assert_eq!(problem.name(), "StreetsMap(src: 0 dst: 5)");
    let report = uniform_cost_search(&problem, &SearchPolicy::default())
        .unwrap()
        .report();
    assert_eq!(report.problem_name, "StreetsMap(src: 0 dst: 5)");
}

#[test]
fn start_on_goal_needs_no_expansion() {
    let problem = MapProblem::new(fixture_map(), 3, 3);
    let result = uniform_cost_search(&problem, &SearchPolicy::default()).unwrap();
    assert!(result.is_goal_reached());
    assert_eq!(result.stats.expansions, 0);
    assert_eq!(result.total_cost(), Some(0.0));
    assert_eq!(result.path().len(), 1);
}
