//! Heuristic estimates of remaining cost.

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// For the engine's optimality guarantee the estimate must be admissible:
/// it never exceeds the true remaining cost. This is a caller contract and
/// is not checked at runtime; a non-admissible heuristic silently degrades
/// optimality.
pub trait Heuristic<S, C> {
    fn estimate(&self, state: &S) -> C;
}

impl<S, C, F> Heuristic<S, C> for F
where
    F: Fn(&S) -> C,
{
    fn estimate(&self, state: &S) -> C {
        self(state)
    }
}
