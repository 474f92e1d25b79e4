//! Configuration of [`FramePreprocessor`](super::FramePreprocessor).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`FramePreprocessor`](super::FramePreprocessor).
///
/// The default values are for Atari Pong, whose 210x160 frames are reduced to 80x80.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PreprocessConfig {
    /// First row of the play area.
    pub crop_top: usize,

    /// Row following the last row of the play area.
    pub crop_bottom: usize,

    /// Step of the decimation in rows and columns.
    pub stride: usize,

    /// Channel taken from RGB frames.
    pub channel: usize,

    /// Background intensities in the channel, erased together with 0.
    pub background: Vec<u8>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            crop_top: 35,
            crop_bottom: 195,
            stride: 2,
            channel: 0,
            background: vec![144, 109],
        }
    }
}

impl PreprocessConfig {
    /// Sets the rows of the play area, `[top, bottom)`.
    pub fn crop(mut self, top: usize, bottom: usize) -> Self {
        self.crop_top = top;
        self.crop_bottom = bottom;
        self
    }

    /// Sets the step of the decimation.
    pub fn stride(mut self, v: usize) -> Self {
        self.stride = v;
        self
    }

    /// Sets the channel.
    pub fn channel(mut self, v: usize) -> Self {
        self.channel = v;
        self
    }

    /// Sets the background intensities.
    pub fn background(mut self, v: Vec<u8>) -> Self {
        self.background = v;
        self
    }

    /// Constructs [`PreprocessConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PreprocessConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_preprocess_config() -> Result<()> {
        let config = PreprocessConfig::default().crop(34, 194).background(vec![144]);

        let dir = TempDir::new("preprocess_config")?;
        let path = dir.path().join("preprocess_config.yaml");
        config.save(&path)?;
        assert_eq!(config, PreprocessConfig::load(&path)?);
        Ok(())
    }
}
