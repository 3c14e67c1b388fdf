//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod handle;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pattern;
pub mod timestamp;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use handle::LoggerHandle;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pattern::{LogFormat, DEFAULT_FORMAT};
pub use timestamp::{TimestampFormat, DEFAULT_DATE_FORMAT};
