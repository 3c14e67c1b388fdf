//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Reference point for `%(relativeCreated)d`
static START: Lazy<DateTime<Local>> = Lazy::new(Local::now);

static PROCESS_NAME: Lazy<String> = Lazy::new(|| {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "MainProcess".to_string())
});

/// When the logging system was first touched in this process
pub fn process_start() -> DateTime<Local> {
    *START
}

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// One log record, as handed to every appender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Dotted name of the logger that produced the record
    pub logger: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub process_id: u32,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a record always occupies exactly one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(logger: impl Into<String>, level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            logger: logger.into(),
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Local::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            process_id: std::process::id(),
        }
    }

    /// Replace the timestamp, mostly useful for deterministic formatting
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Thread name if the thread has one, its id otherwise
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }

    /// Seconds since the Unix epoch, with microsecond resolution
    pub fn created(&self) -> f64 {
        self.timestamp.timestamp_micros() as f64 / 1_000_000.0
    }

    /// Millisecond part of the timestamp
    pub fn msecs(&self) -> f64 {
        f64::from(self.timestamp.timestamp_subsec_micros()) / 1000.0
    }

    /// Milliseconds between [`process_start`] and this record
    pub fn relative_created(&self) -> f64 {
        let elapsed = self.timestamp.signed_duration_since(process_start());
        elapsed.num_microseconds().unwrap_or(i64::MAX) as f64 / 1000.0
    }

    /// Executable name of the current process
    pub fn process_name(&self) -> &'static str {
        PROCESS_NAME.as_str()
    }
}
