use super::Record;

/// Writes a record to an output destination with [`Recorder::write`].
///
/// A recorder only observes; it never changes the outcome of a rollout.
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);
}
