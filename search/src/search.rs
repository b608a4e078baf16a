//! Search entry points and the expansion loop.

use std::cmp::Ordering;

use tracing::{debug, info, trace};
use waypoint_kernel::cost::Cost;
use waypoint_kernel::heuristic::Heuristic;
use waypoint_kernel::problem::GraphProblem;

use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::report::{SearchReport, SearchStatus};
use crate::trace::{ExpandEvent, SearchTrace, SuccessorOutcome, SuccessorRecord};
use crate::visited::{BestCostTable, ClosedSet};

/// Which best-first variant produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Priority is the accumulated cost alone.
    UniformCost,
    /// Priority is accumulated cost plus a heuristic estimate.
    AStar,
}

impl Algorithm {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UniformCost => "UniformCost",
            Self::AStar => "A*",
        }
    }
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A goal state was popped from the frontier.
    GoalReached { node_id: u64 },
    /// The frontier emptied without reaching a goal: no path exists.
    FrontierExhausted,
    /// `max_expansions` was reached before a goal was popped.
    ExpansionLimitExceeded { limit: u64 },
    /// The cheapest frontier entry exceeded `max_cost`.
    CostBoundExceeded { node_id: u64 },
}

/// Aggregate counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States expanded (closed and asked for successors).
    pub expansions: u64,
    /// Closed states expanded again at a strictly cheaper cost.
    pub reopened: u64,
    pub nodes_created: u64,
    pub successors_generated: u64,
    pub closed_suppressed: u64,
    pub dominated_suppressed: u64,
    /// Frontier entries popped after their state had been closed.
    pub stale_discarded: u64,
    /// States left off the frontier because the heuristic estimated them
    /// unreachable.
    pub heuristic_pruned: u64,
    pub frontier_high_water: usize,
}

/// Result of a search execution.
///
/// Always carries the full node arena so any node's path can be
/// reconstructed, whatever the termination.
#[derive(Debug, Clone)]
pub struct SearchResult<S, C> {
    pub problem_name: String,
    pub algorithm: Algorithm,
    pub termination: Termination,
    /// Every node created, indexed by `node_id`.
    pub nodes: Vec<SearchNode<S, C>>,
    /// Expanded states in expansion order, with their expansion cost.
    pub closed: ClosedSet<S, C>,
    pub stats: SearchStats,
    /// Present when the policy asked for a trace.
    pub trace: Option<SearchTrace<S, C>>,
}

impl<S: Clone, C: Cost> SearchResult<S, C> {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, Termination::GoalReached { .. })
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.termination == Termination::FrontierExhausted
    }

    /// Whether a cooperative limit (expansions or cost bound) ended the search.
    #[must_use]
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self.termination,
            Termination::ExpansionLimitExceeded { .. } | Termination::CostBoundExceeded { .. }
        )
    }

    #[must_use]
    pub fn node(&self, node_id: u64) -> Option<&SearchNode<S, C>> {
        usize::try_from(node_id).ok().and_then(|i| self.nodes.get(i))
    }

    #[must_use]
    pub fn goal_node(&self) -> Option<&SearchNode<S, C>> {
        match self.termination {
            Termination::GoalReached { node_id } => self.node(node_id),
            _ => None,
        }
    }

    /// Accumulated cost of the goal node.
    #[must_use]
    pub fn total_cost(&self) -> Option<C> {
        self.goal_node().map(|n| n.g_cost)
    }

    /// Node ids from the root to the goal; empty without a goal.
    #[must_use]
    pub fn path_node_ids(&self) -> Vec<u64> {
        self.goal_node()
            .map(|goal| reconstruct_path(&self.nodes, goal.node_id))
            .unwrap_or_default()
    }

    /// States from the initial state to the goal; empty without a goal.
    #[must_use]
    pub fn path(&self) -> Vec<&S> {
        self.path_node_ids()
            .into_iter()
            .filter_map(|id| self.node(id))
            .map(|n| &n.state)
            .collect()
    }

    /// Labels of the operators along the path (one fewer than the states).
    #[must_use]
    pub fn operator_names(&self) -> Vec<Option<&str>> {
        self.path_node_ids()
            .into_iter()
            .skip(1)
            .filter_map(|id| self.node(id))
            .map(|n| n.operator_name.as_deref())
            .collect()
    }

    /// Owned summary for CLIs and tests.
    #[must_use]
    pub fn report(&self) -> SearchReport<S, C> {
        let status = match self.termination {
            Termination::GoalReached { .. } => SearchStatus::Solved,
            Termination::FrontierExhausted => SearchStatus::Exhausted,
            Termination::ExpansionLimitExceeded { .. } | Termination::CostBoundExceeded { .. } => {
                SearchStatus::LimitExceeded
            }
        };
        SearchReport {
            problem_name: self.problem_name.clone(),
            algorithm: self.algorithm.name().to_string(),
            status,
            total_cost: self.total_cost(),
            path: self.path().into_iter().cloned().collect(),
            operator_names: self
                .operator_names()
                .into_iter()
                .map(|name| name.map(str::to_string))
                .collect(),
            expansions: self.stats.expansions,
        }
    }
}

/// Reconstruct the node ids from the root to `goal_node_id` by walking
/// parent links through the arena.
#[must_use]
pub fn reconstruct_path<S, C>(nodes: &[SearchNode<S, C>], goal_node_id: u64) -> Vec<u64> {
    let mut path = Vec::new();
    let mut current_id = Some(goal_node_id);

    while let Some(id) = current_id {
        let Some(node) = usize::try_from(id).ok().and_then(|i| nodes.get(i)) else {
            break;
        };
        path.push(id);
        current_id = node.parent_id;
    }

    path.reverse();
    path
}

/// Uniform-cost search: priority is the accumulated cost.
///
/// # Errors
///
/// See [`search`].
pub fn uniform_cost_search<P: GraphProblem + ?Sized>(
    problem: &P,
    policy: &SearchPolicy<P::Cost>,
) -> Result<SearchResult<P::State, P::Cost>, SearchError> {
    search(problem, None, policy)
}

/// A* search: priority is accumulated cost plus `heuristic`.
///
/// The result is optimal when the heuristic is admissible; that is not
/// checked.
///
/// # Errors
///
/// See [`search`].
pub fn astar_search<P, H>(
    problem: &P,
    heuristic: &H,
    policy: &SearchPolicy<P::Cost>,
) -> Result<SearchResult<P::State, P::Cost>, SearchError>
where
    P: GraphProblem + ?Sized,
    H: Heuristic<P::State, P::Cost>,
{
    search(
        problem,
        Some(heuristic as &dyn Heuristic<P::State, P::Cost>),
        policy,
    )
}

/// Run best-first search from the problem's initial state.
///
/// Exhaustion and cooperative limits return `Ok` with the matching
/// [`Termination`].
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if the policy fails validation; no
///   search step is taken.
/// - [`SearchError::Problem`] if the problem fails during a goal test or an
///   expansion.
/// - [`SearchError::InvalidOperatorCost`] if a successor's operator cost is
///   negative or not finite.
/// - [`SearchError::InvalidHeuristic`] if an estimate is negative or NaN.
///   A positive-infinity estimate is not an error: the state is pruned.
/// - [`SearchError::CostOverflow`] if accumulating a cost overflows.
pub fn search<P: GraphProblem + ?Sized>(
    problem: &P,
    heuristic: Option<&dyn Heuristic<P::State, P::Cost>>,
    policy: &SearchPolicy<P::Cost>,
) -> Result<SearchResult<P::State, P::Cost>, SearchError> {
    policy.validate()?;
    Engine::new(problem, heuristic, policy).run()
}

/// Per-call search state. Owned exclusively by one `search` call.
struct Engine<'p, P: GraphProblem + ?Sized> {
    problem: &'p P,
    heuristic: Option<&'p dyn Heuristic<P::State, P::Cost>>,
    policy: &'p SearchPolicy<P::Cost>,
    frontier: BestFirstFrontier<P::Cost>,
    nodes: Vec<SearchNode<P::State, P::Cost>>,
    closed: ClosedSet<P::State, P::Cost>,
    best: BestCostTable<P::State, P::Cost>,
    stats: SearchStats,
    trace: Option<SearchTrace<P::State, P::Cost>>,
}

impl<'p, P: GraphProblem + ?Sized> Engine<'p, P> {
    fn new(
        problem: &'p P,
        heuristic: Option<&'p dyn Heuristic<P::State, P::Cost>>,
        policy: &'p SearchPolicy<P::Cost>,
    ) -> Self {
        Self {
            problem,
            heuristic,
            policy,
            frontier: BestFirstFrontier::new(),
            nodes: Vec::new(),
            closed: ClosedSet::new(),
            best: BestCostTable::new(),
            stats: SearchStats::default(),
            trace: policy.record_trace.then(SearchTrace::new),
        }
    }

    fn algorithm(&self) -> Algorithm {
        if self.heuristic.is_some() {
            Algorithm::AStar
        } else {
            Algorithm::UniformCost
        }
    }

    fn run(mut self) -> Result<SearchResult<P::State, P::Cost>, SearchError> {
        let root_state = self.problem.initial_state();
        let zero = self.problem.zero_cost();
        self.best.improve(root_state.clone(), zero);
        self.create_node(None, root_state, zero, 0, None, None)?;

        let termination = self.run_loop()?;

        self.stats.frontier_high_water = self.frontier.high_water();
        info!(
            problem = self.problem.name(),
            algorithm = self.algorithm().name(),
            termination = ?termination,
            expansions = self.stats.expansions,
            nodes = self.stats.nodes_created,
            stale = self.stats.stale_discarded,
            pruned = self.stats.heuristic_pruned,
            frontier_high_water = self.stats.frontier_high_water,
            "search finished"
        );

        Ok(SearchResult {
            problem_name: self.problem.name().to_string(),
            algorithm: self.algorithm(),
            termination,
            nodes: self.nodes,
            closed: self.closed,
            stats: self.stats,
            trace: self.trace,
        })
    }

    fn run_loop(&mut self) -> Result<Termination, SearchError> {
        loop {
            let Some(key) = self.frontier.pop() else {
                return Ok(Termination::FrontierExhausted);
            };
            let node_id = key.creation_order;
            let node = &self.nodes[arena_index(node_id)];

            if self.closed.is_closed_at_or_below(&node.state, &node.g_cost) {
                self.stats.stale_discarded += 1;
                trace!(node_id, "stale frontier entry discarded");
                continue;
            }

            if let Some(bound) = &self.policy.max_cost {
                if node.f_cost.cmp_cost(bound) == Ordering::Greater {
                    return Ok(Termination::CostBoundExceeded { node_id });
                }
            }

            if self.problem.is_goal(&node.state)? {
                return Ok(Termination::GoalReached { node_id });
            }

            if let Some(limit) = self.policy.max_expansions {
                if self.stats.expansions >= limit {
                    return Ok(Termination::ExpansionLimitExceeded { limit });
                }
            }

            self.expand(node_id)?;
        }
    }

    fn expand(&mut self, node_id: u64) -> Result<(), SearchError> {
        let node = &self.nodes[arena_index(node_id)];
        let state = node.state.clone();
        let g_cost = node.g_cost;
        let f_cost = node.f_cost;
        let depth = node.depth;

        if self.closed.contains(&state) {
            self.stats.reopened += 1;
        }
        self.closed.close(state.clone(), g_cost);

        debug!(
            problem = self.problem.name(),
            expansion = self.stats.expansions,
            node_id,
            state = ?state,
            g = ?g_cost,
            f = ?f_cost,
            frontier = self.frontier.len(),
            "expand"
        );

        let problem = self.problem;
        let mut records = Vec::new();
        for item in problem.expand_state_with_costs(&state)? {
            let op = item?;
            self.stats.successors_generated += 1;

            if !op.operator_cost.is_valid_step() {
                return Err(SearchError::InvalidOperatorCost {
                    problem: problem.name().to_string(),
                    detail: format!(
                        "{:?} -> {:?} has cost {:?}",
                        state, op.successor_state, op.operator_cost
                    ),
                });
            }
            let successor_g = g_cost.checked_add_cost(op.operator_cost).ok_or_else(|| {
                SearchError::CostOverflow {
                    detail: format!("{:?} + {:?}", g_cost, op.operator_cost),
                }
            })?;

            let outcome = if self
                .closed
                .is_closed_at_or_below(&op.successor_state, &successor_g)
            {
                self.stats.closed_suppressed += 1;
                SuccessorOutcome::ClosedSuppressed
            } else if !self.best.improve(op.successor_state.clone(), successor_g) {
                self.stats.dominated_suppressed += 1;
                SuccessorOutcome::DominatedSuppressed
            } else {
                match self.create_node(
                    Some(node_id),
                    op.successor_state.clone(),
                    successor_g,
                    depth + 1,
                    Some(op.operator_cost),
                    op.operator_name.clone(),
                )? {
                    Some(to_node) => SuccessorOutcome::Pushed { to_node },
                    None => SuccessorOutcome::HeuristicPruned,
                }
            };
            trace!(node_id, successor = ?op.successor_state, ?outcome, "successor");

            if self.trace.is_some() {
                records.push(SuccessorRecord {
                    state: op.successor_state,
                    operator_name: op.operator_name,
                    operator_cost: op.operator_cost,
                    g_cost: successor_g,
                    outcome,
                });
            }
        }

        if let Some(trace) = &mut self.trace {
            trace.expansions.push(ExpandEvent {
                expansion_order: self.stats.expansions,
                node_id,
                state,
                g_cost,
                pop_priority: f_cost,
                successors: records,
            });
        }
        self.stats.expansions += 1;
        Ok(())
    }

    /// Append a node to the arena and push it onto the frontier.
    ///
    /// Returns `None` without creating a node when the heuristic estimates
    /// the state as unreachable (positive infinity).
    fn create_node(
        &mut self,
        parent_id: Option<u64>,
        state: P::State,
        g_cost: P::Cost,
        depth: u32,
        operator_cost: Option<P::Cost>,
        operator_name: Option<String>,
    ) -> Result<Option<u64>, SearchError> {
        let h_cost = self.heuristic.map(|h| h.estimate(&state));
        let f_cost = match h_cost {
            Some(h) if h.is_unbounded() => {
                self.stats.heuristic_pruned += 1;
                trace!(state = ?state, "pruned by heuristic");
                return Ok(None);
            }
            Some(h) if !h.is_valid_step() => {
                return Err(SearchError::InvalidHeuristic {
                    problem: self.problem.name().to_string(),
                    detail: format!("h({state:?}) = {h:?}"),
                });
            }
            Some(h) => g_cost
                .checked_add_cost(h)
                .ok_or_else(|| SearchError::CostOverflow {
                    detail: format!("priority {g_cost:?} + {h:?}"),
                })?,
            None => g_cost,
        };

        let node_id = self.nodes.len() as u64;
        let node = SearchNode {
            node_id,
            parent_id,
            state,
            g_cost,
            h_cost,
            f_cost,
            depth,
            operator_cost,
            operator_name,
        };
        self.frontier.push(node.frontier_key());
        self.nodes.push(node);
        self.stats.nodes_created += 1;
        Ok(Some(node_id))
    }
}

/// Node ids are arena positions handed out by `create_node`.
#[allow(clippy::cast_possible_truncation)]
fn arena_index(node_id: u64) -> usize {
    node_id as usize
}
