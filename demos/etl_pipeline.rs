//! ETL pipeline example
//!
//! Sets up process-wide logging the way the pipeline runner does and traces
//! each stage.
//!
//! Run with: cargo run --example etl_pipeline

use supermarket_sales_logging::{get_logger, info, log_function_call, setup_logging, Result};

#[derive(Debug)]
struct Sale {
    branch: &'static str,
    total: f64,
}

fn extract_data() -> std::result::Result<Vec<Sale>, String> {
    Ok(vec![
        Sale { branch: "A", total: 548.97 },
        Sale { branch: "C", total: 80.22 },
        Sale { branch: "A", total: 340.53 },
    ])
}

fn transform_data(rows: Vec<Sale>) -> std::result::Result<Vec<Sale>, String> {
    Ok(rows.into_iter().filter(|s| s.total > 100.0).collect())
}

fn load_data(rows: &[Sale]) -> std::result::Result<(), String> {
    if rows.iter().any(|s| s.branch.is_empty()) {
        return Err("row without branch".to_string());
    }
    Ok(())
}

fn main() -> Result<()> {
    let logger = setup_logging("INFO", None, None)?;
    let stages = get_logger("etl");

    logger.info("=== ETL pipeline started ===");

    let run = || -> std::result::Result<(), String> {
        let raw = log_function_call!(extract_data())?;
        info!(stages, "Extracted {} records", raw.len());

        let transformed = log_function_call!(transform_data(raw))?;
        info!(stages, "Transformed {} records", transformed.len());

        log_function_call!(load_data(&transformed))?;
        Ok(())
    };

    match run() {
        Ok(()) => logger.info("=== ETL pipeline finished ==="),
        Err(e) => logger.error(format!("ETL pipeline failed: {}", e)),
    }

    supermarket_sales_logging::root_logger().flush()
}
