//! States, actions, rewards and advantages of an episode.
use crate::{error::VolleyError, RewardShaper};

/// The experience collected in one episode.
///
/// The four sequences have the same length, one entry per environment step.
/// A trajectory is only created for an episode that ran to its end.
#[derive(Debug, Clone)]
pub struct Trajectory<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
    rewards: Vec<f32>,
    advantages: Vec<f32>,
}

impl<S, A> Trajectory<S, A> {
    /// States observed by the policy.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Actions taken by the policy.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Raw rewards given by the environment.
    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    /// Advantages computed from the rewards.
    pub fn advantages(&self) -> &[f32] {
        &self.advantages
    }

    /// The number of steps.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the trajectory has no step.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Sum of the raw rewards, e.g., the score difference of a match.
    pub fn episode_return(&self) -> f32 {
        self.rewards.iter().sum()
    }

    /// Decomposes into `(states, actions, rewards, advantages)`.
    pub fn into_parts(self) -> (Vec<S>, Vec<A>, Vec<f32>, Vec<f32>) {
        (self.states, self.actions, self.rewards, self.advantages)
    }
}

/// Collects steps of a running episode.
pub(crate) struct EpisodeBuffer<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
    rewards: Vec<f32>,
}

impl<S, A> EpisodeBuffer<S, A> {
    pub(crate) fn new() -> Self {
        Self {
            states: vec![],
            actions: vec![],
            rewards: vec![],
        }
    }

    pub(crate) fn push(&mut self, state: S, act: A, reward: f32) {
        self.states.push(state);
        self.actions.push(act);
        self.rewards.push(reward);
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn episode_return(&self) -> f32 {
        self.rewards.iter().sum()
    }

    /// Computes the advantages and freezes the episode.
    pub(crate) fn finish(self, shaper: &RewardShaper) -> Result<Trajectory<S, A>, VolleyError> {
        let advantages = shaper.shape(&self.rewards)?;
        debug_assert_eq!(advantages.len(), self.rewards.len());
        Ok(Trajectory {
            states: self.states,
            actions: self.actions,
            rewards: self.rewards,
            advantages,
        })
    }
}
