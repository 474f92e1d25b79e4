use anyhow::{bail, Result};
use ndarray::Array3;
use volley_core::{record::Record, Env, RewardShaper, RolloutConfig, RolloutController, Step, ZeroVariance};
use volley_pong::{DiffEncoder, Frame, PongAct, PreprocessConfig, RandomPolicy};

/// A Pong-like screen with a ball moving diagonally by two pixels per step.
#[derive(Clone)]
struct BallEnvConfig {
    rewards: Vec<f32>,
}

struct BallEnv {
    config: BallEnvConfig,
    t: usize,
}

impl BallEnv {
    fn frame(&self) -> Frame {
        let mut pixels = Array3::<u8>::from_elem((210, 160, 3), 144);
        // Score, cropped away
        pixels[[10, 30, 0]] = 236;
        pixels[[41 + 2 * self.t, 20 + 2 * self.t, 0]] = 236;
        Frame::new(pixels)
    }
}

impl Env for BallEnv {
    type Config = BallEnvConfig;
    type Obs = Frame;
    type Act = PongAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: 0,
        })
    }

    fn reset(&mut self) -> Result<Frame> {
        self.t = 0;
        Ok(self.frame())
    }

    fn step(&mut self, a: &PongAct) -> Result<(Step<Self>, Record)> {
        self.t += 1;
        let (reward, is_done) = if self.t == 1 {
            if *a != PongAct::NOOP {
                bail!("the first step must be a no-op");
            }
            (0.0, false)
        } else {
            let ix = self.t - 2;
            (self.config.rewards[ix], ix + 1 == self.config.rewards.len())
        };
        let step = Step::new(self.frame(), *a, reward, is_done, false, ());
        Ok((step, Record::empty()))
    }
}

#[test]
fn test_rollout_with_frame_differences() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let rewards = vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0];
    let env_config = BallEnvConfig {
        rewards: rewards.clone(),
    };
    let encoder = DiffEncoder::build(&PreprocessConfig::default())?;
    let mut controller =
        RolloutController::<BallEnv, _>::build(&env_config, encoder, &RolloutConfig::default(), 0)?;
    let mut policy = RandomPolicy::new(42);

    let trajectory = controller.rollout(&mut policy)?;

    assert_eq!(trajectory.len(), 10);
    assert_eq!(trajectory.rewards(), rewards.as_slice());
    assert_eq!(trajectory.episode_return(), 0.0);
    assert!(trajectory
        .actions()
        .iter()
        .all(|a| *a == PongAct::UP || *a == PongAct::DOWN));

    // The ball at step t is at row 3 + t and column 10 + t of the 80x80 image
    for (i, state) in trajectory.states().iter().enumerate() {
        let t = i + 1;
        assert_eq!(state.len(), 6400);
        assert_eq!(state[(3 + t) * 80 + 10 + t], 1.0);
        assert_eq!(state[(2 + t) * 80 + 9 + t], -1.0);
        assert_eq!(state.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    let shaper = RewardShaper::new(0.99, ZeroVariance::Zeros)?;
    assert_eq!(trajectory.advantages(), shaper.shape(&rewards)?.as_slice());
    Ok(())
}

#[test]
fn test_malformed_frame_aborts_episode() -> Result<()> {
    let env_config = BallEnvConfig {
        rewards: vec![0.0, 1.0],
    };
    let config = PreprocessConfig::default().crop(35, 215);
    let encoder = DiffEncoder::build(&config)?;
    let mut controller =
        RolloutController::<BallEnv, _>::build(&env_config, encoder, &RolloutConfig::default(), 0)?;

    assert!(controller.rollout(&mut RandomPolicy::new(0)).is_err());
    Ok(())
}
