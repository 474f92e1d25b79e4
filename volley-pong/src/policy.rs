//! Random policy for Pong.
use crate::{PongAct, StateVector};
use anyhow::{bail, Result};
use volley_core::Policy;

/// Samples actions uniformly at random, ignoring the state.
pub struct RandomPolicy {
    acts: Vec<PongAct>,
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Constructs a policy choosing between [`PongAct::UP`] and [`PongAct::DOWN`].
    pub fn new(seed: u64) -> Self {
        Self::with_acts(vec![PongAct::UP, PongAct::DOWN], seed)
    }

    /// Constructs a policy choosing among `acts`.
    pub fn with_acts(acts: Vec<PongAct>, seed: u64) -> Self {
        Self {
            acts,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy<StateVector, PongAct> for RandomPolicy {
    fn sample(&mut self, _state: &StateVector) -> Result<PongAct> {
        if self.acts.is_empty() {
            bail!("RandomPolicy has no action to choose from");
        }
        Ok(self.acts[self.rng.usize(..self.acts.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_from_acts() {
        let mut policy = RandomPolicy::new(42);
        let state = StateVector::zeros(4);
        let acts = (0..100)
            .map(|_| policy.sample(&state).unwrap())
            .collect::<Vec<_>>();
        assert!(acts.iter().all(|a| *a == PongAct::UP || *a == PongAct::DOWN));
        assert!(acts.contains(&PongAct::UP));
        assert!(acts.contains(&PongAct::DOWN));
    }

    #[test]
    fn test_same_seed_same_acts() {
        let state = StateVector::zeros(4);
        let mut p1 = RandomPolicy::new(7);
        let mut p2 = RandomPolicy::new(7);
        for _ in 0..20 {
            assert_eq!(p1.sample(&state).unwrap(), p2.sample(&state).unwrap());
        }
    }

    #[test]
    fn test_no_acts() {
        let mut policy = RandomPolicy::with_acts(vec![], 0);
        assert!(policy.sample(&StateVector::zeros(1)).is_err());
    }
}
