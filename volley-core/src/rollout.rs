//! Generation of episodes.
mod config;
use crate::{
    error::VolleyError,
    record::{NullRecorder, RecordValue, Recorder},
    trajectory::EpisodeBuffer,
    Act, Env, Policy, RewardShaper, StateEncoder, Trajectory,
};
use anyhow::Result;
pub use config::RolloutConfig;
use log::{debug, info};
use std::{thread, time::Duration};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs a policy in an environment for whole episodes.
///
/// The controller owns the environment and the state encoder. An episode goes
/// through the following phases:
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Init
///     Init --> Running: reset, no-op step
///     Running --> Running: encode, sample, step
///     Running --> Terminal: done
///     Terminal --> [*]: advantages
///     Init --> [*]: error
///     Running --> [*]: error
/// ```
///
/// * **Init**: the environment is reset and stepped once with [`Act::noop()`], so that
///   two observations exist before the first state is encoded.
/// * **Running**: the current and the previous observations are encoded into a state,
///   the policy samples an action, and the environment is stepped with it. The state,
///   the action and the reward are appended to the episode.
/// * **Terminal**: the rewards are converted into advantages with [`RewardShaper`] and
///   the [`Trajectory`] is returned.
///
/// An error of the environment, the encoder or the policy abandons the episode;
/// the collected steps are dropped and the error is returned. The controller can
/// start a fresh episode afterwards.
pub struct RolloutController<E, C>
where
    E: Env,
    C: StateEncoder<E::Obs>,
{
    env: E,
    encoder: C,
    shaper: RewardShaper,
    render: bool,
    step_delay: Option<Duration>,
    max_steps: Option<usize>,
    n_episodes: usize,
}

impl<E, C> RolloutController<E, C>
where
    E: Env,
    C: StateEncoder<E::Obs>,
{
    /// Constructs a controller with a given environment.
    pub fn new(env: E, encoder: C, config: &RolloutConfig) -> Result<Self> {
        let shaper = RewardShaper::new(config.discount_factor, config.zero_variance)?;
        if config.max_steps == Some(0) {
            return Err(VolleyError::InvalidConfig("max_steps must be positive".to_string()).into());
        }
        Ok(Self {
            env,
            encoder,
            shaper,
            render: config.render,
            step_delay: config.step_delay_millis.map(Duration::from_millis),
            max_steps: config.max_steps,
            n_episodes: 0,
        })
    }

    /// Builds the environment with the given seed and constructs a controller.
    pub fn build(env_config: &E::Config, encoder: C, config: &RolloutConfig, seed: i64) -> Result<Self> {
        let env = E::build(env_config, seed)?;
        Self::new(env, encoder, config)
    }

    /// Reference to the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable reference to the environment.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// The number of episodes started so far, including failed ones.
    pub fn n_episodes(&self) -> usize {
        self.n_episodes
    }

    /// Runs an episode and returns its trajectory.
    pub fn rollout<P>(&mut self, policy: &mut P) -> Result<Trajectory<C::State, E::Act>>
    where
        P: Policy<C::State, E::Act> + ?Sized,
    {
        self.rollout_with_recorder(policy, &mut NullRecorder {})
    }

    /// Runs an episode and returns its trajectory, writing a record at every step.
    ///
    /// The record of a step is the one returned by [`Env::step`] with the keys
    /// `episode`, `env_steps`, `reward` and `is_done` added.
    pub fn rollout_with_recorder<P, R>(
        &mut self,
        policy: &mut P,
        recorder: &mut R,
    ) -> Result<Trajectory<C::State, E::Act>>
    where
        P: Policy<C::State, E::Act> + ?Sized,
        R: Recorder + ?Sized,
    {
        let (episode, buffer) = self.run_episode(policy, recorder)?;
        let trajectory = buffer.finish(&self.shaper)?;
        debug!(
            "Episode {} finished: {} steps, return = {}",
            episode,
            trajectory.len(),
            trajectory.episode_return()
        );

        Ok(trajectory)
    }

    /// Runs an episode and returns the sum of its rewards.
    ///
    /// Advantages are not computed, so an episode without any point never fails
    /// with [`VolleyError::DegenerateRewards`].
    pub fn rollout_return<P>(&mut self, policy: &mut P) -> Result<f32>
    where
        P: Policy<C::State, E::Act> + ?Sized,
    {
        let (episode, buffer) = self.run_episode(policy, &mut NullRecorder {})?;
        let episode_return = buffer.episode_return();
        debug!(
            "Episode {} finished: {} steps, return = {}",
            episode,
            buffer.len(),
            episode_return
        );

        Ok(episode_return)
    }

    fn run_episode<P, R>(
        &mut self,
        policy: &mut P,
        recorder: &mut R,
    ) -> Result<(usize, EpisodeBuffer<C::State, E::Act>)>
    where
        P: Policy<C::State, E::Act> + ?Sized,
        R: Recorder + ?Sized,
    {
        let episode = self.n_episodes;
        self.n_episodes += 1;

        // Two observations are required to encode the first state
        let mut prev_obs = self.env.reset()?;
        let (step, _) = self.env.step(&E::Act::noop())?;
        if step.is_done() {
            return Err(VolleyError::EmptyEpisode.into());
        }
        let mut obs = step.obs;

        let mut buffer = EpisodeBuffer::new();

        loop {
            let state = self.encoder.encode(&obs, &prev_obs)?;
            let act = policy.sample(&state)?;
            let (step, mut record) = self.env.step(&act)?;
            let env_steps = buffer.len();
            let reward = step.reward;
            let is_done = step.is_done() || self.max_steps.map_or(false, |m| env_steps + 1 >= m);

            buffer.push(state, act, reward);

            if self.render {
                self.env.render()?;
            }
            if let Some(delay) = self.step_delay {
                thread::sleep(delay);
            }
            if reward > 0.0 {
                info!("Episode {}, step {}: +{}", episode, env_steps, reward);
            } else if reward < 0.0 {
                info!("Episode {}, step {}: {}", episode, env_steps, reward);
            }

            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("env_steps", RecordValue::Scalar(env_steps as _));
            record.insert("reward", RecordValue::Scalar(reward));
            record.insert("is_done", RecordValue::Scalar(if is_done { 1.0 } else { 0.0 }));
            recorder.write(record);

            if is_done {
                break;
            }
            prev_obs = std::mem::replace(&mut obs, step.obs);
        }

        Ok((episode, buffer))
    }
}
