//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// An episode may consist of several sub-games. The environment does not signal their
/// ends; a nonzero reward is taken as the end of a sub-game by [`RewardShaper`].
///
/// [`RewardShaper`]: crate::RewardShaper
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Starts a new episode and returns its first observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    ///
    /// The returned [`Record`] carries environment specific telemetry and is
    /// forwarded to the recorder of the rollout.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Draws the current state of the environment. Does nothing by default.
    fn render(&mut self) -> Result<()> {
        Ok(())
    }
}
