//! Types and traits for recording telemetry of rollouts and training.
//!
//! * [`Record`] - a string-keyed container of [`RecordValue`]s
//! * [`Recorder`] - a destination of records, called once per environment step
//!   during a rollout and once per flush during training
//! * [`RecordStorage`] - stores records and aggregates them into one
//!
//! ```rust
//! use volley_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("env_steps", RecordValue::Scalar(12.0));
//! record.insert("reward", RecordValue::Scalar(-1.0));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
