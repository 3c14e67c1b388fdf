//! Appender that discards everything
//!
//! Installed in place of the file appender when no log file is configured.

use crate::core::{Appender, LogEntry, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct NullAppender;

impl NullAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for NullAppender {
    fn append(&mut self, _entry: &LogEntry) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
