//! File appender implementation
//!
//! Appends one formatted line per record. Missing parent directories are
//! created on open. Every record is flushed immediately; with the `file`
//! feature the flush happens under an advisory exclusive lock so several
//! processes can share one log file without interleaving lines.

use crate::core::{Appender, LogEntry, LogFormat, LoggerError, Result, TimestampFormat};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    format: LogFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            format: LogFormat::default(),
        })
    }

    /// Set the line format for this appender
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the timestamp format used for `%(asctime)s`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use supermarket_sales_logging::{FileAppender, TimestampFormat};
    ///
    /// let appender = FileAppender::new("logs/etl.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format = std::mem::take(&mut self.format).with_timestamp_format(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(feature = "file")]
    fn flush_locked(writer: &mut BufWriter<File>) -> std::io::Result<()> {
        use fs2::FileExt;

        writer.get_ref().lock_exclusive()?;
        let result = writer.flush();
        let unlock = writer.get_ref().unlock();
        result.and(unlock)
    }

    #[cfg(not(feature = "file"))]
    fn flush_locked(writer: &mut BufWriter<File>) -> std::io::Result<()> {
        writer.flush()
    }
}

/// Create the parent directories of `path` if they don't exist yet
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    parent.display().to_string(),
                    e,
                )
            }),
        _ => Ok(()),
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut output = self.format.format(entry);
        output.push('\n');

        writer.write_all(output.as_bytes())?;
        Self::flush_locked(writer)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            Self::flush_locked(writer)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
