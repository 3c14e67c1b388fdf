//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink receiving every record that passes the level check
///
/// Appenders are called with the logger's appender list locked, so a single
/// appender never sees two records concurrently.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;

    /// Push buffered output to its destination; unbuffered sinks keep the default
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Short identifier, reported in error messages and by `Logger::appender_names`
    fn name(&self) -> &str;
}
