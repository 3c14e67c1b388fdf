//! Named logger handles

use super::{logger::Logger, log_level::LogLevel};
use std::fmt;
use std::sync::Arc;

/// A named view onto a [`Logger`]
///
/// Handles are cheap to clone. They hold no sinks of their own: every record
/// goes through the shared logger, so a handle created before the logger is
/// configured picks up the configuration once it exists.
#[derive(Clone)]
pub struct LoggerHandle {
    name: String,
    logger: Arc<Logger>,
}

impl LoggerHandle {
    pub fn new(name: impl Into<String>, logger: Arc<Logger>) -> Self {
        Self {
            name: name.into(),
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle for a dotted child of this logger (`parent.suffix`)
    pub fn child(&self, suffix: &str) -> LoggerHandle {
        LoggerHandle::new(format!("{}.{}", self.name, suffix), Arc::clone(&self.logger))
    }

    /// The logger this handle writes through
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Give this name an explicit level, inherited by its dotted children
    pub fn set_level(&self, level: LogLevel) {
        self.logger.set_level_for(&self.name, Some(level));
    }

    /// Drop the explicit level so the name inherits again
    pub fn clear_level(&self) {
        self.logger.set_level_for(&self.name, None);
    }

    pub fn level(&self) -> Option<LogLevel> {
        self.logger.level_for(&self.name)
    }

    pub fn effective_level(&self) -> LogLevel {
        self.logger.effective_level(&self.name)
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.logger.is_enabled_for(&self.name, level)
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.logger.log(&self.name, level, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.name)
            .field("effective_level", &self.effective_level())
            .finish()
    }
}
