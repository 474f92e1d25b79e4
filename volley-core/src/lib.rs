#![warn(missing_docs)]
//! Experience generation for Monte-Carlo policy gradient.
//!
//! This crate drives an environment for whole episodes, turns consecutive observations
//! into states with a [`StateEncoder`], and converts the sparse per-step rewards of an
//! episode into normalized advantages with [`RewardShaper`]. The resulting [`Trajectory`]
//! is handed to an [`Agent`] for its parameter update, which lives outside this crate.
//!
//! ```no_run
//! # use anyhow::Result;
//! use volley_core::{
//!     dummy::{DummyAgent, DummyEncoder, DummyEnv, DummyEnvConfig},
//!     record::NullRecorder,
//!     RolloutConfig, RolloutController, Trainer, TrainerConfig,
//! };
//!
//! # fn main() -> Result<()> {
//! let env_config = DummyEnvConfig::default().rewards(vec![0.0, 0.0, 1.0, 0.0, -1.0]);
//! let rollout_config = RolloutConfig::default().discount_factor(0.99);
//! let mut controller =
//!     RolloutController::<DummyEnv, _>::build(&env_config, DummyEncoder, &rollout_config, 42)?;
//! let mut agent = DummyAgent::default();
//! let mut trainer = Trainer::build(TrainerConfig::default().max_episodes(10));
//! trainer.train(&mut controller, &mut agent, &mut NullRecorder {})?;
//! # Ok(())
//! # }
//! ```
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Env, Info, Obs, Policy, StateEncoder, Step};

mod reward;
pub use reward::{RewardShaper, ZeroVariance};

mod trajectory;
pub use trajectory::Trajectory;

mod rollout;
pub use rollout::{RolloutConfig, RolloutController};

mod evaluator;
pub use evaluator::DefaultEvaluator;

mod trainer;
pub use trainer::{Trainer, TrainerConfig};
