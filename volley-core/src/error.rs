//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum VolleyError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A reward was NaN or infinite.
    #[error("Non-finite reward at step {index}")]
    NonFiniteReward {
        /// Index of the offending step in the episode.
        index: usize,
    },

    /// The discounted returns of an episode have zero variance and cannot be normalized.
    #[error("Degenerate episode: discounted returns of {len} steps have zero variance")]
    DegenerateRewards {
        /// Number of steps in the episode.
        len: usize,
    },

    /// The environment finished before the first state could be encoded.
    #[error("Episode ended before the first state could be observed")]
    EmptyEpisode,
}
