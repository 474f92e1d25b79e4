//! Observation for Pong.
use crate::PongError;
use image::RgbImage;
use ndarray::{Array3, ArrayView3};
use volley_core::Obs;

/// An RGB frame of the screen, with shape `[height, width, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Array3<u8>,
}

impl Frame {
    /// Wraps an array of shape `[height, width, channels]`.
    ///
    /// The number of channels is checked when the frame is preprocessed.
    pub fn new(pixels: Array3<u8>) -> Self {
        Self { pixels }
    }

    /// Constructs a frame from row-major RGB bytes.
    pub fn from_raw(height: usize, width: usize, data: Vec<u8>) -> Result<Self, PongError> {
        let len = data.len();
        let pixels = Array3::from_shape_vec((height, width, 3), data).map_err(|_| {
            PongError::MalformedFrame(format!(
                "{} bytes cannot form a {}x{}x3 frame",
                len, height, width
            ))
        })?;
        Ok(Self { pixels })
    }

    /// Shape of the frame, `[height, width, channels]`.
    pub fn shape(&self) -> &[usize] {
        self.pixels.shape()
    }

    /// View of the pixels.
    pub fn view(&self) -> ArrayView3<u8> {
        self.pixels.view()
    }
}

impl Obs for Frame {}

impl TryFrom<RgbImage> for Frame {
    type Error = PongError;

    fn try_from(img: RgbImage) -> Result<Self, Self::Error> {
        let (w, h) = img.dimensions();
        Self::from_raw(h as usize, w as usize, img.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_from_rgb_image() {
        let mut img = RgbImage::from_pixel(4, 2, Rgb([144, 72, 17]));
        img.put_pixel(3, 1, Rgb([236, 236, 236]));
        let frame = Frame::try_from(img).unwrap();
        assert_eq!(frame.shape(), &[2, 4, 3]);
        assert_eq!(frame.view()[[0, 0, 0]], 144);
        assert_eq!(frame.view()[[1, 3, 0]], 236);
    }

    #[test]
    fn test_from_raw_wrong_length() {
        assert!(matches!(
            Frame::from_raw(2, 2, vec![0; 11]),
            Err(PongError::MalformedFrame(_))
        ));
    }
}
