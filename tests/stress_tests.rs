//! Stress tests for concurrent use of one logger
//!
//! Logging is synchronous, so every record must be on disk when the call
//! returns, and lines written from different threads must never interleave.

use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use supermarket_sales_logging::{FileAppender, LogFormat, LogLevel, Logger};
use tempfile::TempDir;

#[test]
fn test_concurrent_logging_keeps_lines_intact() {
    const THREADS: usize = 8;
    const MESSAGES_PER_THREAD: usize = 250;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("concurrent.log");
    let format = LogFormat::parse("%(name)s|%(message)s").unwrap();
    let logger = Logger::builder()
        .min_level(LogLevel::Info)
        .appender(FileAppender::new(&path).unwrap().with_format(format))
        .build_shared();

    let barrier = Arc::new(Barrier::new(THREADS));
    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let handle = logger.handle(format!("supermarket_sales.worker{}", t));
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..MESSAGES_PER_THREAD {
                    handle.info(format!("row {} of {}", i, MESSAGES_PER_THREAD));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker panicked");
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);
    for line in &lines {
        let (name, message) = line.split_once('|').expect("intact line");
        assert!(name.starts_with("supermarket_sales.worker"));
        assert!(message.starts_with("row "));
        assert!(message.ends_with(&format!("of {}", MESSAGES_PER_THREAD)));
    }
    assert_eq!(
        logger.metrics().total_logged(),
        (THREADS * MESSAGES_PER_THREAD) as u64
    );
}

#[test]
fn test_level_changes_while_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("toggle.log");
    let logger = Logger::builder()
        .min_level(LogLevel::Info)
        .appender(FileAppender::new(&path).unwrap())
        .build_shared();

    let writer = {
        let handle = logger.handle("supermarket_sales.load");
        thread::spawn(move || {
            for i in 0..500 {
                handle.warning(format!("batch {}", i));
            }
        })
    };
    for i in 0..100 {
        let level = if i % 2 == 0 {
            LogLevel::Critical
        } else {
            LogLevel::Debug
        };
        logger.set_min_level(level);
    }
    writer.join().expect("writer panicked");

    let metrics = logger.metrics();
    assert_eq!(metrics.total_logged() + metrics.filtered_count(), 500);
    let written = fs::read_to_string(&path).unwrap().lines().count() as u64;
    assert_eq!(written, metrics.total_logged());
}
