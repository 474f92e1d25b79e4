//! Errors of Pong preprocessing.
use thiserror::Error;

/// Errors of Pong preprocessing.
#[derive(Error, Debug, PartialEq)]
pub enum PongError {
    /// A frame does not have the expected shape.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
