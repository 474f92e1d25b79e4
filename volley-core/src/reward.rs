//! Conversion of sparse rewards into advantages.
use crate::error::VolleyError;
use log::warn;
use serde::{Deserialize, Serialize};

/// Standard deviations at or below this value are treated as zero.
const MIN_STD: f64 = 1e-8;

/// What [`RewardShaper::shape`] does when the discounted returns have zero variance,
/// e.g., an episode in which every step has the same reward.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum ZeroVariance {
    /// Returns an all-zero advantage vector.
    Zeros,

    /// Fails with [`VolleyError::DegenerateRewards`].
    Fail,
}

impl Default for ZeroVariance {
    fn default() -> Self {
        Self::Zeros
    }
}

/// Computes advantages from the raw rewards of an episode.
///
/// An episode may contain several sub-games, each of which ends with a nonzero reward.
/// The discounted return is accumulated backward from the end of the episode and the
/// accumulator is cleared at every nonzero reward, so credit never leaks from one
/// sub-game into the preceding one. The returns are then standardized over the episode.
#[derive(Debug, Clone)]
pub struct RewardShaper {
    discount_factor: f32,
    zero_variance: ZeroVariance,
}

impl RewardShaper {
    /// Constructs a shaper. `discount_factor` must be in the open interval `(0, 1)`.
    pub fn new(discount_factor: f32, zero_variance: ZeroVariance) -> Result<Self, VolleyError> {
        if !(discount_factor > 0.0 && discount_factor < 1.0) {
            return Err(VolleyError::InvalidConfig(format!(
                "discount_factor must be in (0, 1), got {}",
                discount_factor
            )));
        }
        Ok(Self {
            discount_factor,
            zero_variance,
        })
    }

    /// Returns the discount factor.
    pub fn discount_factor(&self) -> f32 {
        self.discount_factor
    }

    /// Returns discounted returns, reset at every nonzero reward.
    pub fn discounted_returns(&self, rewards: &[f32]) -> Vec<f32> {
        let gamma = self.discount_factor;
        let mut returns = rewards
            .iter()
            .rev()
            .scan(0f32, |acc, &r| {
                if r != 0.0 {
                    *acc = 0.0;
                }
                *acc = *acc * gamma + r;
                Some(*acc)
            })
            .collect::<Vec<_>>();
        returns.reverse();
        returns
    }

    /// Returns the advantages of an episode, having the same length as `rewards`.
    ///
    /// The advantages are the discounted returns with zero mean and unit (population)
    /// standard deviation. The output of an empty episode is empty.
    pub fn shape(&self, rewards: &[f32]) -> Result<Vec<f32>, VolleyError> {
        if let Some(index) = rewards.iter().position(|r| !r.is_finite()) {
            return Err(VolleyError::NonFiniteReward { index });
        }

        let returns = self.discounted_returns(rewards);
        if returns.is_empty() {
            return Ok(returns);
        }

        let n = returns.len() as f64;
        let mean = returns.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = returns
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let std = var.sqrt();

        if std <= MIN_STD {
            return match self.zero_variance {
                ZeroVariance::Zeros => {
                    warn!(
                        "Discounted returns of {} steps have zero variance, advantages set to zero",
                        returns.len()
                    );
                    Ok(vec![0.0; returns.len()])
                }
                ZeroVariance::Fail => Err(VolleyError::DegenerateRewards { len: returns.len() }),
            };
        }

        Ok(returns
            .iter()
            .map(|&v| ((v as f64 - mean) / std) as f32)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: f32 = 0.99;

    fn shaper() -> RewardShaper {
        RewardShaper::new(GAMMA, ZeroVariance::Zeros).unwrap()
    }

    fn mean_std(xs: &[f32]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().map(|&x| x as f64).sum::<f64>() / n;
        let var = xs.iter().map(|&x| (x as f64 - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_three_points() {
        let rewards = [0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 1.0];
        let returns = shaper().discounted_returns(&rewards);
        let g = GAMMA;
        assert_close(
            &returns,
            &[g * g, g, 1.0, -g * g, -g, -1.0, g, 1.0],
        );

        let (mean, std) = mean_std(&returns);
        let expected = returns
            .iter()
            .map(|&v| ((v as f64 - mean) / std) as f32)
            .collect::<Vec<_>>();
        let advantages = shaper().shape(&rewards).unwrap();
        assert_close(&advantages, &expected);
    }

    #[test]
    fn test_normalized() {
        let rewards = [0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0, -1.0];
        let advantages = shaper().shape(&rewards).unwrap();
        assert_eq!(advantages.len(), rewards.len());
        let (mean, std) = mean_std(&advantages);
        assert!(mean.abs() < 1e-5);
        assert!((std - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_leak_across_boundary() {
        // Identical up to and including the reward at index 3; different afterwards.
        let base = [0.0, 0.0, 0.0, 1.0];
        let tails: [&[f32]; 3] = [&[], &[0.0, 0.0, -1.0], &[1.0, 1.0, 0.0, 0.0, 1.0]];
        for tail in tails.iter() {
            let rewards = base.iter().chain(tail.iter()).copied().collect::<Vec<_>>();
            let returns = shaper().discounted_returns(&rewards);
            assert_close(&returns[..4], &[GAMMA.powi(3), GAMMA.powi(2), GAMMA, 1.0]);
        }
    }

    #[test]
    fn test_trailing_zeros_after_last_point() {
        let returns = shaper().discounted_returns(&[-1.0, 0.0, 0.0]);
        assert_close(&returns, &[-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_variance() {
        let rewards = [0.0; 6];
        assert_eq!(shaper().shape(&rewards).unwrap(), vec![0.0; 6]);

        // Every step ends a point with the same reward.
        let rewards = [1.0; 4];
        assert_eq!(shaper().shape(&rewards).unwrap(), vec![0.0; 4]);

        let shaper = RewardShaper::new(GAMMA, ZeroVariance::Fail).unwrap();
        assert_eq!(
            shaper.shape(&[0.0; 6]),
            Err(VolleyError::DegenerateRewards { len: 6 })
        );
        assert_eq!(
            shaper.shape(&[1.0]),
            Err(VolleyError::DegenerateRewards { len: 1 })
        );
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(shaper().shape(&[]).unwrap().is_empty());
        assert_eq!(
            shaper().shape(&[0.0, f32::NAN, 1.0]),
            Err(VolleyError::NonFiniteReward { index: 1 })
        );
    }

    #[test]
    fn test_invalid_discount_factor() {
        for gamma in [0.0, 1.0, -0.5, 1.5, f32::NAN].iter() {
            assert!(RewardShaper::new(*gamma, ZeroVariance::Zeros).is_err());
        }
    }
}
