//! Tests for the process-wide setup
//!
//! Everything here touches the single root logger, so the scenario runs as
//! one sequential test instead of several tests racing on shared state.

use std::fs;
use std::path::Path;
use supermarket_sales_logging::config::default_log_file;
use supermarket_sales_logging::{
    get_logger, log_function_call, root_logger, setup_logging, LogLevel, LoggerError,
};
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(str::to_string)
        .collect()
}

fn extract_data(rows: usize) -> Result<usize, String> {
    if rows == 0 {
        Err("sales.csv is empty".to_string())
    } else {
        Ok(rows)
    }
}

#[test]
fn test_process_wide_setup() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    // A handle taken before setup stays bound to the root logger
    let early = get_logger("etl.extract");
    assert_eq!(early.name(), "supermarket_sales.etl.extract");
    early.info("dropped: nothing configured yet");

    // Default location: <project-root>/logs/supermarket_sales.log
    let root = setup_logging("INFO", None, None).expect("default setup");
    let default_file = default_log_file();
    assert!(default_file.parent().unwrap().is_dir());
    assert!(default_file.is_file());
    assert_eq!(root.name(), "supermarket_sales");
    assert_eq!(root.effective_level(), LogLevel::Info);
    assert_eq!(root_logger().appender_names(), vec!["console", "file"]);

    // Every valid level name, any case, becomes the effective level
    let log_file = temp_dir.path().join("nested").join("run.log");
    let log_file_str = log_file.to_str().unwrap();
    for (name, expected) in [
        ("debug", LogLevel::Debug),
        ("Info", LogLevel::Info),
        ("WARNING", LogLevel::Warning),
        ("error", LogLevel::Error),
        ("CrItIcAl", LogLevel::Critical),
    ] {
        let root = setup_logging(name, Some(log_file_str), None).expect("setup");
        assert_eq!(root.effective_level(), expected, "level {}", name);
        assert_eq!(early.effective_level(), expected, "level {}", name);
    }
    assert!(log_file.parent().unwrap().is_dir());

    // Invalid level: error, previous configuration untouched
    let err = setup_logging("VERBOSE", Some(log_file_str), None).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidLevel { .. }));
    assert_eq!(root.effective_level(), LogLevel::Critical);

    // Invalid format: error as well
    let err = setup_logging("INFO", Some(log_file_str), Some("%(user)s")).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidFormat { .. }));

    // Empty path: null sink instead of a file
    setup_logging("INFO", Some(""), None).expect("setup without file");
    assert_eq!(root_logger().appender_names(), vec!["console", "null"]);

    // Call tracing through the accessor writes to the configured file
    let trace_file = temp_dir.path().join("trace.log");
    setup_logging(
        "info",
        Some(trace_file.to_str().unwrap()),
        Some("%(levelname)s|%(name)s|%(message)s"),
    )
    .expect("setup with format");

    assert_eq!(log_function_call!(extract_data(1000)), Ok(1000));
    let failure = log_function_call!(extract_data(0));
    assert_eq!(failure, Err("sales.csv is empty".to_string()));

    let logger_name = format!("supermarket_sales.{}", module_path!().replace("::", "."));
    assert_eq!(
        read_lines(&trace_file),
        vec![
            format!("INFO|{}|Calling function: extract_data", logger_name),
            format!("INFO|{}|Function extract_data completed successfully", logger_name),
            format!("INFO|{}|Calling function: extract_data", logger_name),
            format!(
                "ERROR|{}|Function extract_data failed: sales.csv is empty",
                logger_name
            ),
        ]
    );

    // The early handle now writes with the new format
    early.warning("late but delivered");
    let lines = read_lines(&trace_file);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("WARNING|supermarket_sales.etl.extract|late but delivered")
    );
}
