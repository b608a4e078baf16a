//! Explicit labelled digraph with named, weighted edges.
//!
//! Edges keep insertion order, so successor order (and therefore tie-breaking)
//! is exactly the order the edges were declared in.

use std::collections::{BTreeMap, BTreeSet};

use waypoint_kernel::problem::{GraphProblem, OperatorResult, ProblemError, Successors};

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: String,
    pub cost: f64,
    pub name: String,
}

/// A finite digraph over string labels.
///
/// A label is a valid state once it appears as a start, goal, or edge
/// endpoint. Asking about any other label is an invalid-state error.
#[derive(Debug, Clone)]
pub struct WeightedDigraph {
    name: String,
    start: String,
    goals: BTreeSet<String>,
    edges: BTreeMap<String, Vec<Edge>>,
}

impl WeightedDigraph {
    #[must_use]
    pub fn new(name: impl Into<String>, start: impl Into<String>) -> Self {
        let start = start.into();
        let mut edges = BTreeMap::new();
        edges.insert(start.clone(), Vec::new());
        Self {
            name: name.into(),
            start,
            goals: BTreeSet::new(),
            edges,
        }
    }

    #[must_use]
    pub fn goal(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.edges.entry(label.clone()).or_default();
        self.goals.insert(label);
        self
    }

    /// Add `from -> to` named `"{from}->{to}"`.
    #[must_use]
    pub fn edge(self, from: &str, to: &str, cost: f64) -> Self {
        let name = format!("{from}->{to}");
        self.named_edge(from, to, cost, name)
    }

    #[must_use]
    pub fn named_edge(mut self, from: &str, to: &str, cost: f64, name: impl Into<String>) -> Self {
        self.edges.entry(to.to_owned()).or_default();
        self.edges.entry(from.to_owned()).or_default().push(Edge {
            target: to.to_owned(),
            cost,
            name: name.into(),
        });
        self
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.edges.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn out_edges(&self, label: &str) -> Option<&[Edge]> {
        self.edges.get(label).map(Vec::as_slice)
    }

    #[must_use]
    pub fn goals(&self) -> &BTreeSet<String> {
        &self.goals
    }

    fn check(&self, state: &str) -> Result<&[Edge], ProblemError> {
        self.out_edges(state)
            .ok_or_else(|| ProblemError::InvalidState {
                problem: self.name.clone(),
                detail: format!("unknown label {state:?}"),
            })
    }
}

impl GraphProblem for WeightedDigraph {
    type State = String;
    type Cost = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> String {
        self.start.clone()
    }

    fn is_goal(&self, state: &String) -> Result<bool, ProblemError> {
        self.check(state)?;
        Ok(self.goals.contains(state))
    }

    fn expand_state_with_costs<'a>(
        &'a self,
        state: &'a String,
    ) -> Result<Successors<'a, String, f64>, ProblemError> {
        let edges = self.check(state)?;
        Ok(Box::new(edges.iter().map(|e| {
            Ok(OperatorResult::new(e.target.clone(), e.cost).with_name(e.name.clone()))
        })))
    }
}
