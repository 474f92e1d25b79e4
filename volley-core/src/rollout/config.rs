//! Configuration of [`RolloutController`](super::RolloutController).
use crate::ZeroVariance;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`RolloutController`](super::RolloutController).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RolloutConfig {
    /// Discount factor of rewards, in `(0, 1)`.
    pub discount_factor: f32,

    /// Handling of episodes whose discounted returns have zero variance.
    pub zero_variance: ZeroVariance,

    /// Renders the environment after every step.
    pub render: bool,

    /// Sleeps this many milliseconds after every step, for watching a game at human pace.
    pub step_delay_millis: Option<u64>,

    /// Ends an episode once this many steps were collected.
    pub max_steps: Option<usize>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.99,
            zero_variance: ZeroVariance::Zeros,
            render: false,
            step_delay_millis: None,
            max_steps: None,
        }
    }
}

impl RolloutConfig {
    /// Sets the discount factor.
    pub fn discount_factor(mut self, v: f32) -> Self {
        self.discount_factor = v;
        self
    }

    /// Sets the handling of zero-variance episodes.
    pub fn zero_variance(mut self, v: ZeroVariance) -> Self {
        self.zero_variance = v;
        self
    }

    /// Sets the render flag.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Sets the delay after each step in milliseconds.
    pub fn step_delay_millis(mut self, v: Option<u64>) -> Self {
        self.step_delay_millis = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Renders every step and plays at 50 steps per second.
    pub fn watch(self) -> Self {
        self.render(true).step_delay_millis(Some(20))
    }

    /// Constructs [`RolloutConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RolloutConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
