//! Policy.
use anyhow::Result;

/// A policy on the states produced by a [`StateEncoder`](crate::StateEncoder).
///
/// Policy is a mapping from a state to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<S, A> {
    /// Sample an action given a state.
    fn sample(&mut self, state: &S) -> Result<A>;
}
