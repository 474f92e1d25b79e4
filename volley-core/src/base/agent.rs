//! Agent.
use super::Policy;
use crate::{record::Record, Trajectory};
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy.
///
/// The update rule is up to the implementation; it receives a whole episode at once.
pub trait Agent<S, A>: Policy<S, A> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Updates the policy with the states, actions and advantages of an episode
    /// and returns some information about the update.
    fn learn(&mut self, trajectory: &Trajectory<S, A>) -> Result<Record>;

    /// Save the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the agent from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
