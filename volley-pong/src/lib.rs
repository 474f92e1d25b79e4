//! Pong frames for [`volley_core`].
//!
//! The preprocessing follows the well-known policy-gradient Pong agent: the play area of an
//! Atari Pong frame is cropped, decimated by two, and binarized so that the paddles and
//! the ball are 1 and everything else is 0. The state seen by a policy is the difference
//! of two consecutive preprocessed frames, which makes motion visible.
//!
//! ```no_run
//! use volley_pong::{DiffEncoder, Frame, PreprocessConfig};
//! use volley_core::StateEncoder;
//! # fn main() -> anyhow::Result<()> {
//! let encoder = DiffEncoder::build(&PreprocessConfig::default())?;
//! let prev = Frame::from_raw(210, 160, vec![144; 210 * 160 * 3])?;
//! let frame = Frame::from_raw(210, 160, vec![144; 210 * 160 * 3])?;
//! let state = encoder.encode(&frame, &prev)?;
//! assert_eq!(state.len(), 6400);
//! # Ok(())
//! # }
//! ```
mod act;
mod encoder;
mod error;
mod frame;
mod policy;
mod preprocess;
pub use act::PongAct;
pub use encoder::{DiffEncoder, StateVector};
pub use error::PongError;
pub use frame::Frame;
pub use policy::RandomPolicy;
pub use preprocess::{FramePreprocessor, PreprocessConfig, PreprocessedFrame};
