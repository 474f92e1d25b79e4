//! Train [`Agent`].
mod config;
use crate::{
    error::VolleyError,
    record::{
        RecordStorage,
        RecordValue::{DateTime, Scalar},
        Recorder,
    },
    Agent, DefaultEvaluator, Env, RolloutController, StateEncoder, Trajectory,
};
use anyhow::{Context, Result};
use chrono::Local;
pub use config::TrainerConfig;
use log::{info, warn};
use std::path::Path;

/// Smoothing factor of the running reward.
const RUNNING_REWARD_DECAY: f32 = 0.99;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages training loop and related objects.
///
/// # Training loop
///
/// 0. Given a [`RolloutController`], an agent implementing [`Agent`] and a recorder
///    implementing [`Recorder`].
/// 1. Set the agent to training mode and run an episode.
///     * If the episode fails, it is discarded and a fresh episode is started. After
///       more than `max_consecutive_failures` failures in a row, the error is returned.
/// 2. Hand the trajectory to [`Agent::learn`], `episodes += 1`.
/// 3. Store the record of the update with `episode_return`, `episode_length` and
///    `running_reward`.
/// 4. If `episodes % flush_record_interval == 0`, write the aggregated records with
///    `episode` and `timestamp`.
/// 5. If `episodes % eval_interval == 0`, evaluate the agent with [`DefaultEvaluator`],
///    write `eval_reward` and save the best model in `(model_dir)/best`. Failed
///    evaluation episodes are retried like training episodes.
/// 6. If `episodes % save_interval == 0`, save the model in `(model_dir)/(episodes)`.
/// 7. Finish when `episodes == max_episodes`, else back to 1.
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Act|B[Env]
///     B -->|Obs|C[StateEncoder]
///     C -->|State|A
///     B -->|reward|D[RewardShaper]
///     D -->|Trajectory|A
/// ```
pub struct Trainer {
    max_episodes: usize,
    flush_record_interval: usize,
    eval_interval: usize,
    n_episodes_per_eval: usize,
    save_interval: usize,
    max_consecutive_failures: usize,
    model_dir: Option<String>,
    storage: RecordStorage,
    running_reward: Option<f32>,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            max_episodes: config.max_episodes,
            flush_record_interval: config.flush_record_interval,
            eval_interval: config.eval_interval,
            n_episodes_per_eval: config.n_episodes_per_eval,
            save_interval: config.save_interval,
            max_consecutive_failures: config.max_consecutive_failures,
            model_dir: config.model_dir,
            storage: RecordStorage::new(),
            running_reward: None,
        }
    }

    /// Exponential moving average of episode returns.
    pub fn running_reward(&self) -> Option<f32> {
        self.running_reward
    }

    fn log_save(result: Result<()>, model_dir: &Path) {
        match result {
            Ok(()) => info!("Saved the model in {:?}.", model_dir),
            Err(e) => warn!("Failed to save model in {:?}: {}", model_dir, e),
        }
    }

    /// Writes the aggregated records with the episode count and a timestamp.
    fn flush<R: Recorder + ?Sized>(&mut self, episodes: usize, recorder: &mut R) {
        let mut record = self.storage.aggregate();
        record.insert("episode", Scalar(episodes as _));
        record.insert("timestamp", DateTime(Local::now()));
        recorder.write(record);
    }

    fn update_running_reward(&mut self, episode_return: f32) -> f32 {
        let r = match self.running_reward {
            None => episode_return,
            Some(r) => r * RUNNING_REWARD_DECAY + episode_return * (1.0 - RUNNING_REWARD_DECAY),
        };
        self.running_reward = Some(r);
        r
    }

    /// Runs an episode, retrying with fresh episodes on failure.
    fn rollout<E, C, G>(
        &self,
        controller: &mut RolloutController<E, C>,
        agent: &mut G,
    ) -> Result<Trajectory<C::State, E::Act>>
    where
        E: Env,
        C: StateEncoder<E::Obs>,
        G: Agent<C::State, E::Act> + ?Sized,
    {
        let mut failures = 0;
        loop {
            match controller.rollout(agent) {
                Ok(trajectory) => return Ok(trajectory),
                Err(e) if failures < self.max_consecutive_failures => {
                    failures += 1;
                    warn!(
                        "Episode {} failed ({}/{}): {}",
                        controller.n_episodes() - 1,
                        failures,
                        self.max_consecutive_failures,
                        e
                    );
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Episode failed after {} retries", failures)
                    })
                }
            }
        }
    }

    /// Train the agent.
    pub fn train<E, C, G, R>(
        &mut self,
        controller: &mut RolloutController<E, C>,
        agent: &mut G,
        recorder: &mut R,
    ) -> Result<()>
    where
        E: Env,
        C: StateEncoder<E::Obs>,
        G: Agent<C::State, E::Act> + ?Sized,
        R: Recorder + ?Sized,
    {
        if self.flush_record_interval == 0 || self.eval_interval == 0 || self.save_interval == 0 {
            return Err(VolleyError::InvalidConfig("intervals must be positive".to_string()).into());
        }
        let mut evaluator = DefaultEvaluator::new(self.n_episodes_per_eval)?
            .max_consecutive_failures(self.max_consecutive_failures);
        let mut max_eval_reward = f32::MIN;
        let mut episodes: usize = 0;
        agent.train();

        while episodes < self.max_episodes {
            let trajectory = self.rollout(controller, agent)?;
            let mut record = agent.learn(&trajectory)?;
            episodes += 1;

            let episode_return = trajectory.episode_return();
            let running_reward = self.update_running_reward(episode_return);
            record.insert("episode_return", Scalar(episode_return));
            record.insert("episode_length", Scalar(trajectory.len() as _));
            record.insert("running_reward", Scalar(running_reward));
            self.storage.store(record);

            if episodes % self.flush_record_interval == 0 {
                self.flush(episodes, recorder);
            }

            if episodes % self.eval_interval == 0 {
                info!("Starts evaluation of the trained model");
                agent.eval();
                let record = evaluator.evaluate(controller, agent);
                agent.train();
                let mut record = record?;
                let eval_reward = record.get_scalar("eval_reward")?;
                record.insert("episode", Scalar(episodes as _));
                recorder.write(record);

                // Save the best model up to the current iteration
                if eval_reward > max_eval_reward {
                    max_eval_reward = eval_reward;
                    if let Some(model_dir) = self.model_dir.as_ref() {
                        let path = Path::new(model_dir).join("best");
                        Self::log_save(agent.save_params(&path), &path);
                    }
                }
            }

            if episodes % self.save_interval == 0 {
                if let Some(model_dir) = self.model_dir.as_ref() {
                    let path = Path::new(model_dir).join(episodes.to_string());
                    Self::log_save(agent.save_params(&path), &path);
                }
            }
        }

        // Write records not flushed yet
        if !self.storage.is_empty() {
            self.flush(episodes, recorder);
        }

        Ok(())
    }
}
