//! Console appender implementation

use crate::core::{Appender, LogEntry, LogFormat, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Which standard stream the console appender writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard error, the usual destination of a stream handler
    #[default]
    Stderr,
    Stdout,
}

pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    stream: ConsoleStream,
    format: LogFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: false,
            stream: ConsoleStream::default(),
            format: LogFormat::default(),
        }
    }

    /// Colorize the level name (needs the `console` feature, ignored otherwise)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    /// Set the line format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use supermarket_sales_logging::{ConsoleAppender, LogFormat};
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_format(LogFormat::parse("%(levelname)s %(message)s").unwrap());
    /// ```
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the timestamp format used for `%(asctime)s`
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format = self.format.with_timestamp_format(format);
        self
    }

    fn render(&self, entry: &LogEntry) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            return self
                .format
                .format_with(entry, |level| level.color(entry.level.color_code()).to_string());
        }
        self.format.format(entry)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.render(entry);
        match self.stream {
            ConsoleStream::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
            ConsoleStream::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stderr => std::io::stderr().flush()?,
            ConsoleStream::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
