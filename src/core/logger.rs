//! Main logger implementation
//!
//! A [`Logger`] owns the appender list, the root level and the per-name level
//! overrides. It is shared behind an `Arc` by every [`LoggerHandle`] created
//! from it, so reconfiguring the logger is visible through existing handles.

use super::{
    appender::Appender,
    error::Result,
    handle::LoggerHandle,
    log_entry::{self, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct Logger {
    min_level: RwLock<LogLevel>,
    /// Explicit levels keyed by dotted logger name
    levels: RwLock<HashMap<String, LogLevel>>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create an unconfigured logger: no appenders, root level WARNING
    ///
    /// Until an appender is added, records at WARNING or above are printed
    /// bare to stderr and everything else is discarded.
    #[must_use]
    pub fn new() -> Self {
        log_entry::process_start();
        Self {
            min_level: RwLock::new(LogLevel::Warning),
            levels: RwLock::new(HashMap::new()),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Get a handle for `name` bound to this logger
    pub fn handle(self: &Arc<Self>, name: impl Into<String>) -> LoggerHandle {
        LoggerHandle::new(name, Arc::clone(self))
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Swap the whole appender list
    ///
    /// The previous appenders are flushed and dropped; a flush failure is
    /// reported on stderr since the replacement already happened.
    pub fn replace_appenders(&self, appenders: Vec<Box<dyn Appender>>) {
        let old = std::mem::replace(&mut *self.appenders.write(), appenders);
        for mut appender in old {
            if let Err(e) = appender.flush() {
                eprintln!(
                    "[LOGGER ERROR] Appender '{}' flush failed on replace: {}",
                    appender.name(),
                    e
                );
            }
        }
    }

    /// Names of the installed appenders, in dispatch order
    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    /// Set or clear the explicit level of a named logger
    pub fn set_level_for(&self, name: &str, level: Option<LogLevel>) {
        let mut levels = self.levels.write();
        match level {
            Some(level) => {
                levels.insert(name.to_string(), level);
            }
            None => {
                levels.remove(name);
            }
        }
    }

    /// Explicit level of a named logger, if one was set
    pub fn level_for(&self, name: &str) -> Option<LogLevel> {
        self.levels.read().get(name).copied()
    }

    /// Level in force for `name`: its own, else the nearest dotted ancestor's, else the root's
    pub fn effective_level(&self, name: &str) -> LogLevel {
        let levels = self.levels.read();
        let mut current = name;
        loop {
            if let Some(level) = levels.get(current) {
                return *level;
            }
            match current.rfind('.') {
                Some(idx) => current = &current[..idx],
                None => break,
            }
        }
        *self.min_level.read()
    }

    pub fn is_enabled_for(&self, name: &str, level: LogLevel) -> bool {
        level >= self.effective_level(name)
    }

    pub fn log(&self, name: &str, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled_for(name, level) {
            self.metrics.record_filtered();
            return;
        }

        let entry = LogEntry::new(name, level, message);
        let mut appenders = self.appenders.write();
        if appenders.is_empty() {
            Self::last_resort(&entry);
            return;
        }
        Self::process_sync(&mut appenders, &entry, &self.metrics);
    }

    /// Output used while no appender is installed
    fn last_resort(entry: &LogEntry) {
        if entry.level >= LogLevel::Warning {
            eprintln!("{}", entry.message);
        }
    }

    /// Process log entry with per-appender panic isolation
    ///
    /// One failing appender doesn't prevent the other appenders from
    /// receiving the entry.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_failed();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for [`Logger`]
///
/// # Example
///
/// ```
/// use supermarket_sales_logging::{Logger, LogLevel, NullAppender};
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(NullAppender::new())
///     .build();
/// assert_eq!(logger.min_level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        log_entry::process_start();
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.set_min_level(self.min_level);
        logger.replace_appenders(self.appenders);
        logger
    }

    /// Build and wrap in an `Arc`, ready to hand out handles
    #[must_use]
    pub fn build_shared(self) -> Arc<Logger> {
        Arc::new(self.build())
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
