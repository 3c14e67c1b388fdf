//! File logging example
//!
//! Demonstrates a logger built by hand with console and file appenders,
//! a custom line format and per-name levels.
//!
//! Run with: cargo run --example file_logging

use supermarket_sales_logging::prelude::*;

fn main() -> Result<()> {
    let format = LogFormat::parse("%(asctime)s [%(levelname)-8s] %(name)s: %(message)s")?
        .with_timestamp_format(TimestampFormat::Iso8601);

    let logger = Logger::builder()
        .min_level(LogLevel::Info)
        .appender(ConsoleAppender::new().with_colors(true).with_format(format.clone()))
        .appender(FileAppender::new("logs/file_logging_demo.log")?.with_format(format))
        .build_shared();

    let db = logger.handle("supermarket_sales.database");
    let etl = logger.handle("supermarket_sales.etl");

    db.set_level(LogLevel::Debug);

    db.debug("Connecting to warehouse");
    db.info("Connection established");
    etl.debug("Hidden: etl stays at INFO");
    etl.warning("Branch C has no rows for 2019-03");
    etl.error("Failed to load optional dimension: dim_payment");

    logger.flush()?;
    println!("Check 'logs/file_logging_demo.log' for the file output");
    Ok(())
}
