//! Scripted environment, encoder and agent, used for tests.
use crate::{record::Record, Act, Agent, Env, Info, Obs, Policy, StateEncoder, Step, Trajectory};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Dummy observation, the number of steps since the last reset.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub usize);

impl Obs for DummyObs {}

/// Dummy action.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub u8);

impl Act for DummyAct {
    fn noop() -> Self {
        Self(0)
    }
}

/// Dummy info.
#[derive(Clone, Debug)]
pub struct DummyInfo;

impl Info for DummyInfo {}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug, Default)]
pub struct DummyEnvConfig {
    /// Rewards of the steps after the no-op step; the episode ends at the last one.
    pub rewards: Vec<f32>,

    /// Zero-based index of the step that fails, if any.
    pub fail_at: Option<usize>,

    /// The failure applies only to this many episodes from the start, or all if `None`.
    pub n_failing_episodes: Option<usize>,
}

impl DummyEnvConfig {
    /// Sets the reward script.
    pub fn rewards(mut self, v: Vec<f32>) -> Self {
        self.rewards = v;
        self
    }

    /// Sets the failing step.
    pub fn fail_at(mut self, v: usize) -> Self {
        self.fail_at = Some(v);
        self
    }

    /// Sets the number of failing episodes.
    pub fn n_failing_episodes(mut self, v: usize) -> Self {
        self.n_failing_episodes = Some(v);
        self
    }
}

/// An environment replaying a fixed reward script in every episode.
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: Option<usize>,
    n_resets: usize,
    n_renders: usize,
}

impl DummyEnv {
    /// The number of resets so far.
    pub fn n_resets(&self) -> usize {
        self.n_resets
    }

    /// The number of renderings so far.
    pub fn n_renders(&self) -> usize {
        self.n_renders
    }

    fn fails(&self, ix: usize) -> bool {
        let episode_fails = match self.config.n_failing_episodes {
            None => true,
            Some(n) => self.n_resets <= n,
        };
        episode_fails && self.config.fail_at == Some(ix)
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Act = DummyAct;
    type Obs = DummyObs;
    type Info = DummyInfo;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: None,
            n_resets: 0,
            n_renders: 0,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.n_resets += 1;
        self.t = Some(0);
        Ok(DummyObs(0))
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let t = match self.t {
            Some(t) => t + 1,
            None => bail!("DummyEnv is stepped before reset"),
        };
        self.t = Some(t);

        // The first step after a reset is the no-op step
        let (reward, is_done) = if t == 1 {
            (0.0, self.config.rewards.is_empty())
        } else {
            let ix = t - 2;
            if self.fails(ix) {
                bail!("DummyEnv failed at step {}", ix);
            }
            match self.config.rewards.get(ix) {
                Some(r) => (*r, ix + 1 == self.config.rewards.len()),
                None => bail!("DummyEnv is stepped after the end of the episode"),
            }
        };

        let step = Step::new(DummyObs(t), a.clone(), reward, is_done, false, DummyInfo);
        Ok((step, Record::empty()))
    }

    fn render(&mut self) -> Result<()> {
        self.n_renders += 1;
        Ok(())
    }
}

/// Encodes a pair of [`DummyObs`] into `[obs, prev_obs]`.
pub struct DummyEncoder;

impl StateEncoder<DummyObs> for DummyEncoder {
    type State = Vec<f32>;

    fn encode(&self, obs: &DummyObs, prev_obs: &DummyObs) -> Result<Self::State> {
        Ok(vec![obs.0 as f32, prev_obs.0 as f32])
    }
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
struct DummyParams {
    n_learns: usize,
}

/// An agent alternating actions 1 and 2, counting its calls.
#[derive(Debug, Default)]
pub struct DummyAgent {
    /// Zero-based index of the call of [`Policy::sample`] that fails, if any.
    pub fail_at: Option<usize>,

    /// The number of calls of [`Policy::sample`].
    pub n_samples: usize,

    /// The number of calls of [`Agent::learn`].
    pub n_learns: usize,

    /// Lengths of the trajectories given to [`Agent::learn`].
    pub trajectory_lengths: Vec<usize>,

    train: bool,
}

impl DummyAgent {
    /// Sets the failing call of [`Policy::sample`].
    pub fn fail_at(mut self, v: usize) -> Self {
        self.fail_at = Some(v);
        self
    }
}

impl Policy<Vec<f32>, DummyAct> for DummyAgent {
    fn sample(&mut self, _state: &Vec<f32>) -> Result<DummyAct> {
        if self.fail_at == Some(self.n_samples) {
            bail!("DummyAgent failed at sample {}", self.n_samples);
        }
        self.n_samples += 1;
        Ok(DummyAct(1 + (self.n_samples % 2) as u8))
    }
}

impl Agent<Vec<f32>, DummyAct> for DummyAgent {
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn learn(&mut self, trajectory: &Trajectory<Vec<f32>, DummyAct>) -> Result<Record> {
        self.n_learns += 1;
        self.trajectory_lengths.push(trajectory.len());
        let loss = -trajectory.advantages().iter().sum::<f32>();
        Ok(Record::from_scalar("loss", loss))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        let params = DummyParams {
            n_learns: self.n_learns,
        };
        fs::write(path.join("params.yaml"), serde_yaml::to_string(&params)?)?;
        Ok(())
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        let params: DummyParams = serde_yaml::from_str(&fs::read_to_string(path.join("params.yaml"))?)?;
        self.n_learns = params.n_learns;
        Ok(())
    }
}
