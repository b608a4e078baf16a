//! Cooperative limits: expansion caps and cost bounds end the search with
//! their own terminations, distinct from success and exhaustion.

use lock_tests::{fixture_map, line_graph, random_digraph};
use waypoint_harness::worlds::grid_maze::GridMaze;
use waypoint_harness::worlds::streets_map::MapProblem;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::report::SearchStatus;
use waypoint_search::search::{uniform_cost_search, Termination};

#[test]
fn limit_equal_to_required_expansions_still_solves() {
    let policy = SearchPolicy::default().with_max_expansions(2);
    let result = uniform_cost_search(&line_graph(), &policy).unwrap();
    assert!(result.is_goal_reached());
    assert_eq!(result.stats.expansions, 2);
}

#[test]
fn limit_below_required_expansions_stops_early() {
    let policy = SearchPolicy::default().with_max_expansions(1);
    let result = uniform_cost_search(&line_graph(), &policy).unwrap();

    assert_eq!(
        result.termination,
        Termination::ExpansionLimitExceeded { limit: 1 }
    );
    assert!(result.is_limit_exceeded());
    assert!(!result.is_exhausted());
    assert_eq!(result.stats.expansions, 1);
    assert!(result.path().is_empty());

    let report = result.report();
    assert_eq!(report.status, SearchStatus::LimitExceeded);
    assert!(report.to_string().contains("LIMIT EXCEEDED"));
}

#[test]
fn zero_limit_still_checks_the_root_goal() {
    let policy = SearchPolicy::default().with_max_expansions(0);
    let solved = uniform_cost_search(&MapProblem::new(fixture_map(), 2, 2), &policy).unwrap();
    assert!(solved.is_goal_reached());

    let stopped = uniform_cost_search(&MapProblem::new(fixture_map(), 0, 5), &policy).unwrap();
    assert!(stopped.is_limit_exceeded());
    assert_eq!(stopped.stats.expansions, 0);
}

#[test]
fn expansion_limit_is_never_overrun() {
    let maze = GridMaze::open_room(30, 30);
    for limit in [1, 5, 17, 100] {
        let policy = SearchPolicy::default()
            .with_max_expansions(limit)
            .with_trace(true);
        let result = uniform_cost_search(&maze, &policy).unwrap();
        assert!(result.is_limit_exceeded(), "limit {limit}");
        assert_eq!(result.stats.expansions, limit);
        assert_eq!(result.trace.as_ref().unwrap().expansions.len() as u64, limit);
    }
}

#[test]
fn cost_bound_stops_before_expensive_goal() {
    let policy = SearchPolicy::default().with_max_cost(2.5);
    let result = uniform_cost_search(&line_graph(), &policy).unwrap();

    assert!(matches!(
        result.termination,
        Termination::CostBoundExceeded { .. }
    ));
    assert!(result.is_limit_exceeded());
    assert_eq!(result.total_cost(), None);
    assert_eq!(result.report().status, SearchStatus::LimitExceeded);
}

#[test]
fn cost_bound_at_optimum_is_inclusive() {
    let policy = SearchPolicy::default().with_max_cost(3.0);
    let result = uniform_cost_search(&line_graph(), &policy).unwrap();
    assert!(result.is_goal_reached());
    assert_eq!(result.total_cost(), Some(3.0));
}

#[test]
fn loose_limits_do_not_change_the_answer() {
    for seed in 0..16 {
        let g = random_digraph(seed, 7, 30);
        let free = uniform_cost_search(&g, &SearchPolicy::default()).unwrap();
        let bounded = uniform_cost_search(
            &g,
            &SearchPolicy::default()
                .with_max_expansions(1_000)
                .with_max_cost(1_000.0),
        )
        .unwrap();
        assert_eq!(free.total_cost(), bounded.total_cost(), "seed {seed}");
        assert_eq!(free.stats, bounded.stats, "seed {seed}");
    }
}

#[test]
fn exhaustion_beats_a_generous_limit() {
    let policy = SearchPolicy::default().with_max_expansions(1_000);
    let result = uniform_cost_search(&MapProblem::new(fixture_map(), 0, 6), &policy).unwrap();
    assert_eq!(result.termination, Termination::FrontierExhausted);
}
