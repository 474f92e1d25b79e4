use super::{Record, RecordValue, Recorder};
use log::{log, Level};

/// Writes records to the [`log`] facade, one line per record.
///
/// Keys are sorted so that lines of successive records line up.
/// Arrays are summarized by their length.
pub struct LogRecorder {
    level: Level,
}

impl Default for LogRecorder {
    fn default() -> Self {
        Self { level: Level::Info }
    }
}

impl LogRecorder {
    /// Constructs a recorder logging at the given level.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    fn format(record: &Record) -> String {
        let mut items = record
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    RecordValue::Scalar(v) => format!("{}", v),
                    RecordValue::DateTime(v) => v.to_rfc3339(),
                    RecordValue::Array1(v) => format!("[{} values]", v.len()),
                    RecordValue::String(v) => v.clone(),
                };
                format!("{} = {}", k, v)
            })
            .collect::<Vec<_>>();
        items.sort();
        items.join(", ")
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        if record.is_empty() {
            return;
        }
        log!(self.level, "{}", Self::format(&record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sorts_keys() {
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("episode", RecordValue::Scalar(3.0)),
            ("advantages", RecordValue::Array1(vec![0.0; 4])),
        ]);
        assert_eq!(
            LogRecorder::format(&record),
            "advantages = [4 values], episode = 3, reward = 1"
        );
    }
}
