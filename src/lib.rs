//! # Supermarket Sales Logging
//!
//! Process-wide logging setup for the Supermarket Sales data warehouse tools.
//!
//! ## Features
//!
//! - **One-call setup**: [`setup_logging`] installs a console and a file
//!   appender at a given level with a `%(field)s` line format
//! - **Namespaced handles**: [`get_logger`] returns `supermarket_sales.<name>`
//!   handles with inherited, overridable levels
//! - **Call tracing**: [`call_trace`] and [`log_function_call!`] log the start,
//!   success or failure of a call and hand failures back unchanged
//! - **Layered configuration**: [`LoggingConfig`] from defaults, YAML/JSON and
//!   environment variables

pub mod appenders;
pub mod call_trace;
pub mod config;
pub mod core;
pub mod macros;
pub mod setup;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, NullAppender};
    pub use crate::call_trace::{traced, traced_call, try_traced_call};
    pub use crate::config::LoggingConfig;
    pub use crate::core::{
        Appender, LogEntry, LogFormat, LogLevel, Logger, LoggerBuilder, LoggerError,
        LoggerHandle, LoggerMetrics, Result, TimestampFormat,
    };
    pub use crate::setup::{get_logger, init, setup_logging};
}

pub use crate::appenders::{ConsoleAppender, FileAppender, NullAppender};
pub use crate::config::{LoggingConfig, ROOT_LOGGER_NAME};
pub use crate::core::{
    Appender, LogEntry, LogFormat, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerHandle,
    LoggerMetrics, Result, TimestampFormat, DEFAULT_DATE_FORMAT, DEFAULT_FORMAT,
};
pub use crate::setup::{get_logger, init, init_from_file, root_logger, setup_logging};
