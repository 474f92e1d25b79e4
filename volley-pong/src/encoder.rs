//! Frame-difference state encoder.
use crate::{Frame, FramePreprocessor, PongError, PreprocessConfig};
use anyhow::Result;
use ndarray::Array1;
use volley_core::StateEncoder;

/// Flattened state vector, in row-major order of the preprocessed frame.
pub type StateVector = Array1<f32>;

/// Encodes two consecutive frames into the difference of their preprocessed images.
///
/// Values of the state are in `{-1.0, 0.0, 1.0}`: 1 where an object appeared since
/// the previous frame and -1 where it left.
#[derive(Debug, Clone)]
pub struct DiffEncoder {
    preprocessor: FramePreprocessor,
}

impl DiffEncoder {
    /// Constructs an encoder with a preprocessor built from `config`.
    pub fn build(config: &PreprocessConfig) -> Result<Self, PongError> {
        Ok(Self::new(FramePreprocessor::build(config)?))
    }

    /// Constructs an encoder.
    pub fn new(preprocessor: FramePreprocessor) -> Self {
        Self { preprocessor }
    }

    /// Dimension of states for frames of the given width.
    pub fn state_dim(&self, width: usize) -> usize {
        let [rows, cols] = self.preprocessor.output_shape(width);
        rows * cols
    }
}

impl StateEncoder<Frame> for DiffEncoder {
    type State = StateVector;

    fn encode(&self, obs: &Frame, prev_obs: &Frame) -> Result<Self::State> {
        if obs.shape() != prev_obs.shape() {
            return Err(PongError::MalformedFrame(format!(
                "frames of shapes {:?} and {:?} cannot be compared",
                prev_obs.shape(),
                obs.shape()
            ))
            .into());
        }
        let cur = self.preprocessor.preprocess(obs)?;
        let prev = self.preprocessor.preprocess(prev_obs)?;
        Ok((cur - prev).iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn frame_with_ball(row: usize, col: usize) -> Frame {
        let mut pixels = Array3::<u8>::from_elem((210, 160, 3), 144);
        pixels[[row, col, 0]] = 236;
        Frame::new(pixels)
    }

    #[test]
    fn test_same_frames_give_zero_state() {
        let encoder = DiffEncoder::build(&PreprocessConfig::default()).unwrap();
        let frame = frame_with_ball(101, 80);
        let state = encoder.encode(&frame, &frame).unwrap();
        assert_eq!(state.len(), 6400);
        assert_eq!(encoder.state_dim(160), 6400);
        assert!(state.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_motion() {
        let encoder = DiffEncoder::build(&PreprocessConfig::default()).unwrap();
        let prev = frame_with_ball(101, 80);
        let cur = frame_with_ball(103, 84);
        let state = encoder.encode(&cur, &prev).unwrap();

        // (101, 80) -> [33, 40], (103, 84) -> [34, 42]
        assert_eq!(state[33 * 80 + 40], -1.0);
        assert_eq!(state[34 * 80 + 42], 1.0);
        assert_eq!(state.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    #[test]
    fn test_shape_mismatch() {
        let encoder = DiffEncoder::build(&PreprocessConfig::default()).unwrap();
        let prev = Frame::new(Array3::<u8>::zeros((210, 160, 3)));
        let cur = Frame::new(Array3::<u8>::zeros((210, 158, 3)));
        let err = encoder.encode(&cur, &prev).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PongError>(),
            Some(PongError::MalformedFrame(_))
        ));
    }
}
