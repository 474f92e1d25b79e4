//! Evaluation of a policy.
use crate::{error::VolleyError, record::Record, Env, Policy, RolloutController, StateEncoder};
use anyhow::{Context, Result};
use log::{info, warn};

/// Runs a fixed number of episodes and reports the average return as `eval_reward`.
///
/// A failed episode is discarded and replaced by a fresh one, up to
/// `max_consecutive_failures` failures in a row.
///
/// The caller of [`DefaultEvaluator::evaluate`] is responsible for the mode of the
/// agent, like training/evaluation mode.
pub struct DefaultEvaluator {
    n_episodes: usize,
    max_consecutive_failures: usize,
}

impl DefaultEvaluator {
    /// Constructs an evaluator running `n_episodes` episodes per evaluation.
    pub fn new(n_episodes: usize) -> Result<Self> {
        if n_episodes == 0 {
            return Err(VolleyError::InvalidConfig("n_episodes must be positive".to_string()).into());
        }
        Ok(Self {
            n_episodes,
            max_consecutive_failures: 0,
        })
    }

    /// Sets the number of failed episodes tolerated in a row.
    pub fn max_consecutive_failures(mut self, v: usize) -> Self {
        self.max_consecutive_failures = v;
        self
    }

    /// Evaluates a policy.
    pub fn evaluate<E, C, P>(
        &mut self,
        controller: &mut RolloutController<E, C>,
        policy: &mut P,
    ) -> Result<Record>
    where
        E: Env,
        C: StateEncoder<E::Obs>,
        P: Policy<C::State, E::Act> + ?Sized,
    {
        let mut r_total = 0f32;
        let mut failures = 0;
        let mut n = 0;

        while n < self.n_episodes {
            match controller.rollout_return(policy) {
                Ok(r) => {
                    r_total += r;
                    n += 1;
                    failures = 0;
                }
                Err(e) if failures < self.max_consecutive_failures => {
                    failures += 1;
                    warn!(
                        "Evaluation episode {} failed ({}/{}): {}",
                        controller.n_episodes() - 1,
                        failures,
                        self.max_consecutive_failures,
                        e
                    );
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Evaluation episode failed after {} retries", failures)
                    })
                }
            }
        }

        let eval_reward = r_total / self.n_episodes as f32;
        info!("Evaluation over {} episodes: {}", self.n_episodes, eval_reward);
        Ok(Record::from_scalar("eval_reward", eval_reward))
    }
}
