//! Timestamp formatting utilities
//!
//! Renders the `%(asctime)s` field. The default matches the classic
//! `2025-01-08 10:30:45,123` layout; ISO 8601, RFC 3339 and arbitrary
//! strftime formats (`datefmt`) are also available.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// strftime layout of [`TimestampFormat::Default`]
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Timestamp format options for `%(asctime)s`
///
/// # Examples
///
/// ```
/// use supermarket_sales_logging::TimestampFormat;
///
/// // Simple date only
/// let format = TimestampFormat::Custom("%Y-%m-%d".to_string());
/// assert!(!format.format(&chrono::Local::now()).contains(' '));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time with milliseconds: `2025-01-08 10:30:45,123`
    #[default]
    Default,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+01:00`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+01:00`
    Rfc3339,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Build from an optional `datefmt` string; `None` keeps the default layout
    ///
    /// A strftime string with an unknown or truncated specifier is rejected.
    pub fn from_datefmt(datefmt: Option<&str>) -> Result<Self> {
        let format = match datefmt {
            None => TimestampFormat::Default,
            Some(fmt) => match fmt.to_ascii_lowercase().as_str() {
                "iso8601" => TimestampFormat::Iso8601,
                "rfc3339" => TimestampFormat::Rfc3339,
                _ => TimestampFormat::Custom(fmt.to_string()),
            },
        };
        format.validate()?;
        Ok(format)
    }

    /// Check a custom strftime string against chrono's specifier set
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(fmt) = self {
            if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::invalid_format(
                    fmt,
                    "datefmt contains an invalid strftime specifier",
                ));
            }
        }
        Ok(())
    }

    /// Format a `DateTime<Local>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Default => datetime.format(DEFAULT_DATE_FORMAT).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // Unvalidated layouts fall back to the default instead of panicking
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    return datetime.format(DEFAULT_DATE_FORMAT).to_string();
                }
                out
            }
        }
    }
}
