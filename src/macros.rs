//! Logging macros for ergonomic log message formatting.
//!
//! These macros take a [`LoggerHandle`](crate::LoggerHandle) and `format!`
//! arguments, similar to `println!`.
//!
//! # Examples
//!
//! ```
//! use supermarket_sales_logging::{get_logger, info, warning};
//!
//! let logger = get_logger("etl.load");
//!
//! info!(logger, "Loading fact table");
//! let rows = 1000;
//! warning!(logger, "Skipped {} of {} rows", 3, rows);
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use supermarket_sales_logging::{get_logger, LogLevel};
/// use supermarket_sales_logging::log;
/// let logger = get_logger("etl");
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Trace a call that returns a `Result`.
///
/// Logs through `get_logger(<calling module>)` with the function path as
/// the name; the `Result` is returned unchanged.
///
/// ```
/// use supermarket_sales_logging::log_function_call;
///
/// fn extract_data(path: &str) -> Result<usize, String> {
///     if path.ends_with(".csv") { Ok(1000) } else { Err(format!("not a csv: {}", path)) }
/// }
///
/// assert_eq!(log_function_call!(extract_data("sales.csv")), Ok(1000));
/// assert!(log_function_call!(extract_data("sales.xlsx")).is_err());
/// ```
#[macro_export]
macro_rules! log_function_call {
    ($func:ident $(:: $rest:ident)* ( $($arg:expr),* $(,)? )) => {
        $crate::call_trace::try_traced_call(
            &$crate::get_logger(&module_path!().replace("::", ".")),
            concat!(stringify!($func) $(, "::", stringify!($rest))*),
            || $func $(:: $rest)* ( $($arg),* ),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger};

    #[test]
    fn test_level_macros() {
        let logger = Logger::builder().min_level(LogLevel::Debug).build_shared();
        let handle = logger.handle("supermarket_sales.macros");

        log!(handle, LogLevel::Info, "Formatted: {}", 42);
        debug!(handle, "Count: {}", 5);
        info!(handle, "Items: {}", 100);
        warning!(handle, "Retry {} of {}", 1, 3);
        error!(handle, "Code: {}", 500);
        critical!(handle, "Critical failure: {}", "disk");

        // No appenders: nothing counted as written
        assert_eq!(logger.metrics().total_logged(), 0);
        assert_eq!(logger.metrics().filtered_count(), 0);
    }

    #[test]
    fn test_log_function_call_macro() {
        fn checked_div(a: u32, b: u32) -> Result<u32, String> {
            a.checked_div(b).ok_or_else(|| "division by zero".to_string())
        }

        assert_eq!(log_function_call!(checked_div(10, 2)), Ok(5));
        assert_eq!(
            log_function_call!(checked_div(1, 0)),
            Err("division by zero".to_string())
        );
        assert_eq!(log_function_call!(u32::try_from(7u64)).ok(), Some(7));
    }
}
