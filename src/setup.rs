//! Process-wide logging setup
//!
//! One root [`Logger`] lives for the whole process. [`setup_logging`] (or
//! [`init`]) installs its appenders; [`get_logger`] hands out namespaced
//! handles onto it. Handles taken before setup keep working afterwards.

use crate::appenders::{ConsoleAppender, FileAppender, NullAppender};
use crate::config::{FileTarget, LoggingConfig, ROOT_LOGGER_NAME};
use crate::core::{Appender, Logger, LoggerHandle, Result};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

static ROOT: Lazy<Arc<Logger>> = Lazy::new(|| Arc::new(Logger::new()));

/// The process-wide logger behind every handle from [`get_logger`]
pub fn root_logger() -> &'static Arc<Logger> {
    &ROOT
}

/// Configure process-wide logging
///
/// - `level`: DEBUG, INFO, WARNING, ERROR or CRITICAL, case-insensitive
/// - `log_file`: `None` for `<project-root>/logs/supermarket_sales.log`,
///   `Some("")` for no file output, otherwise the file to append to
/// - `log_format`: line format, `None` for
///   `%(asctime)s - %(name)s - %(levelname)s - %(message)s`
///
/// Parent directories of the log file are created. The console and file
/// appenders replace whatever was installed before. Returns the
/// `supermarket_sales` handle.
///
/// A repeated call is not ignored, unlike a configure-once setup: it
/// flushes and replaces the previous appenders, and the new level applies
/// to handles already handed out.
///
/// # Example
///
/// ```no_run
/// use supermarket_sales_logging::{get_logger, setup_logging};
///
/// let logger = setup_logging("INFO", None, None).expect("logging setup");
/// logger.info("=== ETL pipeline started ===");
/// get_logger("etl.extract").debug("not shown at INFO");
/// ```
pub fn setup_logging(
    level: &str,
    log_file: Option<&str>,
    log_format: Option<&str>,
) -> Result<LoggerHandle> {
    let mut config = LoggingConfig::new().with_level(level);
    config.file = log_file.map(str::to_string);
    config.format = log_format.map(str::to_string);
    init(&config)
}

/// Configure process-wide logging from a [`LoggingConfig`]
pub fn init(config: &LoggingConfig) -> Result<LoggerHandle> {
    configure(root_logger(), config)?;
    Ok(root_logger().handle(ROOT_LOGGER_NAME))
}

/// Load configuration (defaults, optional file, environment) and apply it
pub fn init_from_file(path: Option<&Path>) -> Result<LoggerHandle> {
    let config = LoggingConfig::load(path)?;
    init(&config)
}

/// Apply `config` to an arbitrary logger
///
/// Level and format are validated before anything changes, so a bad
/// configuration leaves the previous setup in place.
pub fn configure(logger: &Logger, config: &LoggingConfig) -> Result<()> {
    let level = config.parsed_level()?;
    let format = config.compiled_format()?;

    let mut appenders: Vec<Box<dyn Appender>> = Vec::with_capacity(2);
    if config.console {
        appenders.push(Box::new(
            ConsoleAppender::new()
                .with_colors(config.colors)
                .with_format(format.clone()),
        ));
    }
    match config.file_target() {
        FileTarget::Path(path) => {
            appenders.push(Box::new(FileAppender::new(path)?.with_format(format)))
        }
        FileTarget::Disabled => appenders.push(Box::new(NullAppender::new())),
    }

    logger.replace_appenders(appenders);
    logger.set_min_level(level);
    Ok(())
}

/// Handle named `supermarket_sales.<name>` on the process-wide logger
pub fn get_logger(name: &str) -> LoggerHandle {
    root_logger().handle(format!("{}.{}", ROOT_LOGGER_NAME, name))
}
