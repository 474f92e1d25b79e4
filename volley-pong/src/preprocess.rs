//! Reduction of Pong frames to binary images of the play area.
mod config;
use crate::{Frame, PongError};
pub use config::PreprocessConfig;
use log::debug;
use ndarray::{s, Array2, Axis};

/// A cropped, decimated and binarized frame with values in `{0.0, 1.0}`.
pub type PreprocessedFrame = Array2<f32>;

/// Reduces frames to the play area, with paddles and ball as 1 and the rest as 0.
///
/// The steps are:
///
/// 1. crop rows `[crop_top, crop_bottom)`, removing the score and the borders,
/// 2. take every `stride`-th row and column,
/// 3. keep a single channel,
/// 4. map 0 and the background intensities to 0, and everything else to 1.
#[derive(Debug, Clone)]
pub struct FramePreprocessor {
    config: PreprocessConfig,
}

impl FramePreprocessor {
    /// Constructs a preprocessor.
    pub fn build(config: &PreprocessConfig) -> Result<Self, PongError> {
        if config.crop_top >= config.crop_bottom {
            return Err(PongError::InvalidConfig(format!(
                "empty crop [{}, {})",
                config.crop_top, config.crop_bottom
            )));
        }
        if config.stride == 0 {
            return Err(PongError::InvalidConfig("stride must be positive".to_string()));
        }
        if config.channel >= 3 {
            return Err(PongError::InvalidConfig(format!(
                "channel {} of an RGB frame",
                config.channel
            )));
        }
        debug!("FramePreprocessor: {:?}", config);
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Shape `[rows, columns]` of preprocessed frames for frames of the given width.
    pub fn output_shape(&self, width: usize) -> [usize; 2] {
        let stride = self.config.stride;
        let rows = self.config.crop_bottom - self.config.crop_top;
        [(rows + stride - 1) / stride, (width + stride - 1) / stride]
    }

    /// Preprocesses a frame.
    pub fn preprocess(&self, frame: &Frame) -> Result<PreprocessedFrame, PongError> {
        let shape = frame.shape();
        if shape[2] != 3 {
            return Err(PongError::MalformedFrame(format!(
                "expected 3 channels, got {}",
                shape[2]
            )));
        }
        if shape[0] < self.config.crop_bottom || shape[1] == 0 {
            return Err(PongError::MalformedFrame(format!(
                "a {}x{} frame does not contain rows [{}, {})",
                shape[0], shape[1], self.config.crop_top, self.config.crop_bottom
            )));
        }

        let stride = self.config.stride as isize;
        let background = &self.config.background;
        let pixels = frame.view();
        let img = pixels
            .slice(s![self.config.crop_top..self.config.crop_bottom;stride, ..;stride, ..])
            .index_axis_move(Axis(2), self.config.channel)
            .mapv(|x| {
                if x == 0 || background.contains(&x) {
                    0f32
                } else {
                    1f32
                }
            });

        Ok(img)
    }
}
