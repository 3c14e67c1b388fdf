//! Call tracing
//!
//! Wraps a function call with three log lines: INFO `Calling function: f`
//! before the call, INFO `Function f completed successfully` after it, or
//! ERROR `Function f failed: <reason>` when it fails. Failures always reach
//! the caller unchanged: an `Err` is returned as-is and a panic is resumed
//! with its original payload.

use crate::core::logger::panic_message;
use crate::core::LoggerHandle;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

fn log_start(handle: &LoggerHandle, function: &str) {
    handle.info(format!("Calling function: {}", function));
}

fn log_success(handle: &LoggerHandle, function: &str) {
    handle.info(format!("Function {} completed successfully", function));
}

fn log_failure(handle: &LoggerHandle, function: &str, reason: impl Display) {
    handle.error(format!("Function {} failed: {}", function, reason));
}

/// Log the start, run `f`, and log + resume a panic
fn run_logged<T, F>(handle: &LoggerHandle, function: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    log_start(handle, function);
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            log_failure(handle, function, panic_message(payload.as_ref()));
            panic::resume_unwind(payload)
        }
    }
}

/// Trace a fallible call
///
/// # Example
///
/// ```
/// use supermarket_sales_logging::{call_trace::try_traced_call, get_logger};
///
/// let logger = get_logger("etl.extract");
/// let rows: Result<usize, String> = try_traced_call(&logger, "extract_data", || Ok(1000));
/// assert_eq!(rows, Ok(1000));
/// ```
pub fn try_traced_call<T, E, F>(handle: &LoggerHandle, function: &str, f: F) -> Result<T, E>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    let result = run_logged(handle, function, f);
    match &result {
        Ok(_) => log_success(handle, function),
        Err(e) => log_failure(handle, function, e),
    }
    result
}

/// Trace an infallible call; a panic is the failure case
pub fn traced_call<T, F>(handle: &LoggerHandle, function: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let value = run_logged(handle, function, f);
    log_success(handle, function);
    value
}

/// Wrap `f` so that every call through the returned closure is traced
///
/// # Example
///
/// ```
/// use supermarket_sales_logging::{call_trace::traced, get_logger};
///
/// let transform = traced(get_logger("etl.transform"), "transform_data", |rows: Vec<u32>| {
///     if rows.is_empty() {
///         Err("no rows to transform".to_string())
///     } else {
///         Ok(rows.len())
///     }
/// });
///
/// assert_eq!(transform(vec![1, 2, 3]), Ok(3));
/// assert!(transform(Vec::new()).is_err());
/// ```
pub fn traced<A, T, E, F>(
    handle: LoggerHandle,
    function: impl Into<String>,
    f: F,
) -> impl Fn(A) -> Result<T, E>
where
    E: Display,
    F: Fn(A) -> Result<T, E>,
{
    let function = function.into();
    move |args| try_traced_call(&handle, &function, || f(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::FileAppender;
    use crate::core::{LogFormat, LogLevel, Logger};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn file_logger(dir: &TempDir) -> (LoggerHandle, PathBuf) {
        let path = dir.path().join("trace.log");
        let appender = FileAppender::new(&path)
            .unwrap()
            .with_format(LogFormat::parse("%(levelname)s %(name)s %(message)s").unwrap());
        let logger = Logger::builder()
            .min_level(LogLevel::Info)
            .appender(appender)
            .build_shared();
        (logger.handle("supermarket_sales.etl"), path)
    }

    fn lines(path: &PathBuf) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_success_logs_two_info_lines() {
        let dir = TempDir::new().unwrap();
        let (handle, path) = file_logger(&dir);

        let result: Result<u32, String> = try_traced_call(&handle, "load_data", || Ok(7));

        assert_eq!(result, Ok(7));
        assert_eq!(
            lines(&path),
            vec![
                "INFO supermarket_sales.etl Calling function: load_data",
                "INFO supermarket_sales.etl Function load_data completed successfully",
            ]
        );
    }

    #[test]
    fn test_error_is_logged_and_returned_unchanged() {
        #[derive(Debug, PartialEq)]
        struct LoadError(&'static str);

        impl Display for LoadError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "connection refused: {}", self.0)
            }
        }

        let dir = TempDir::new().unwrap();
        let (handle, path) = file_logger(&dir);

        let result: Result<(), LoadError> =
            try_traced_call(&handle, "load_data", || Err(LoadError("db:5432")));

        assert_eq!(result, Err(LoadError("db:5432")));
        assert_eq!(
            lines(&path),
            vec![
                "INFO supermarket_sales.etl Calling function: load_data",
                "ERROR supermarket_sales.etl Function load_data failed: connection refused: db:5432",
            ]
        );
    }

    #[test]
    fn test_infallible_call_returns_value() {
        let dir = TempDir::new().unwrap();
        let (handle, path) = file_logger(&dir);

        let total = traced_call(&handle, "sum_sales", || [1.5, 2.5].iter().sum::<f64>());

        assert_eq!(total, 4.0);
        assert_eq!(lines(&path).len(), 2);
    }

    #[test]
    fn test_panic_is_logged_and_resumed() {
        let dir = TempDir::new().unwrap();
        let (handle, path) = file_logger(&dir);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            traced_call(&handle, "transform_data", || -> u32 { panic!("bad row 42") })
        }));

        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"bad row 42"));
        assert_eq!(
            lines(&path),
            vec![
                "INFO supermarket_sales.etl Calling function: transform_data",
                "ERROR supermarket_sales.etl Function transform_data failed: bad row 42",
            ]
        );
    }

    #[test]
    fn test_traced_wrapper_traces_every_call() {
        let dir = TempDir::new().unwrap();
        let (handle, path) = file_logger(&dir);

        let parse = traced(handle, "parse_quantity", |raw: &str| raw.parse::<u32>());

        assert_eq!(parse("12"), Ok(12));
        assert!(parse("twelve").is_err());

        let lines = lines(&path);
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("ERROR supermarket_sales.etl Function parse_quantity failed: "));
    }

    #[test]
    fn test_filtered_below_info() {
        let dir = TempDir::new().unwrap();
        let (handle, path) = file_logger(&dir);
        handle.set_level(LogLevel::Error);

        let result: Result<(), &str> = try_traced_call(&handle, "extract_data", || Err("missing csv"));

        assert!(result.is_err());
        assert_eq!(
            lines(&path),
            vec!["ERROR supermarket_sales.etl Function extract_data failed: missing csv"]
        );
    }
}
