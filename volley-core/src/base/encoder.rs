//! Conversion of observations into states.
use anyhow::Result;
use std::fmt::Debug;

/// Builds the state seen by a policy from two consecutive observations.
///
/// A single observation cannot tell how objects move, so the encoder receives
/// the latest observation together with the one before it.
pub trait StateEncoder<O> {
    /// State consumed by the policy.
    type State: Clone + Debug;

    /// Encodes the observation `obs` given the preceding observation `prev_obs`.
    fn encode(&self, obs: &O, prev_obs: &O) -> Result<Self::State>;
}
