//! Logging configuration
//!
//! A [`LoggingConfig`] is assembled in layers, later layers winning:
//!
//! 1. built-in defaults (`INFO`, default log file, default line format)
//! 2. an optional YAML (`.yaml`/`.yml`) or JSON (`.json`) file, either the
//!    bare settings or a document with a top-level `logging:` section
//! 3. environment variables `SUPERMARKET_SALES_LOG_LEVEL`,
//!    `SUPERMARKET_SALES_LOG_FILE` and `SUPERMARKET_SALES_LOG_FORMAT`

use crate::core::{LogFormat, LogLevel, LoggerError, Result, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of every logger name handed out by the accessor
pub const ROOT_LOGGER_NAME: &str = "supermarket_sales";

/// File name used when no log file is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "supermarket_sales.log";

pub const ENV_LOG_LEVEL: &str = "SUPERMARKET_SALES_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "SUPERMARKET_SALES_LOG_FILE";
pub const ENV_LOG_FORMAT: &str = "SUPERMARKET_SALES_LOG_FORMAT";

/// `<project-root>/logs`
pub fn default_log_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("logs")
}

/// `<project-root>/logs/supermarket_sales.log`
pub fn default_log_file() -> PathBuf {
    default_log_dir().join(DEFAULT_LOG_FILE_NAME)
}

/// Where file output goes once the configuration is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTarget {
    Path(PathBuf),
    /// No file path resolves; a null appender takes the file's place
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level name, case-insensitive
    pub level: String,
    /// `None` selects the default file, an empty string disables file output
    pub file: Option<String>,
    /// Line format; `None` selects [`crate::DEFAULT_FORMAT`]
    pub format: Option<String>,
    /// strftime layout for `%(asctime)s`, or `iso8601` / `rfc3339`
    pub datefmt: Option<String>,
    /// Install the console appender
    pub console: bool,
    /// Colorize level names on the console
    pub colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.to_string(),
            file: None,
            format: None,
            datefmt: None,
            console: true,
            colors: false,
        }
    }
}

#[derive(Deserialize)]
struct Document {
    logging: LoggingConfig,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Turn file output off (a null appender is installed instead)
    #[must_use]
    pub fn without_file(mut self) -> Self {
        self.file = Some(String::new());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_datefmt(mut self, datefmt: impl Into<String>) -> Self {
        self.datefmt = Some(datefmt.into());
        self
    }

    #[must_use]
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Defaults, then `path` if given, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Read a YAML or JSON file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logging configuration", path.display().to_string(), e)
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        parsed.map_err(|e| LoggerError::config_parse(path.display().to_string(), e.to_string()))
    }

    /// Parse YAML, accepting either the bare settings or a `logging:` section
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoggerError::config_parse("<yaml>", e.to_string()))?;
        let result = if value.get("logging").is_some() {
            serde_yaml::from_value::<Document>(value).map(|doc| doc.logging)
        } else {
            serde_yaml::from_value::<Self>(value)
        };
        result.map_err(|e| LoggerError::config_parse("<yaml>", e.to_string()))
    }

    /// Parse JSON, accepting either the bare settings or a `logging` object
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| LoggerError::config_parse("<json>", e.to_string()))?;
        let result = if value.get("logging").is_some() {
            serde_json::from_value::<Document>(value).map(|doc| doc.logging)
        } else {
            serde_json::from_value::<Self>(value)
        };
        result.map_err(|e| LoggerError::config_parse("<json>", e.to_string()))
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`)
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.level = level;
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.file = Some(file);
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.format = Some(format);
        }
        self
    }

    pub fn parsed_level(&self) -> Result<LogLevel> {
        self.level.parse()
    }

    /// Compile the line format together with the `datefmt`; both are validated
    pub fn compiled_format(&self) -> Result<LogFormat> {
        let format = match self.format.as_deref() {
            Some(pattern) => LogFormat::parse(pattern)?,
            None => LogFormat::default(),
        };
        let timestamp = TimestampFormat::from_datefmt(self.datefmt.as_deref())?;
        Ok(format.with_timestamp_format(timestamp))
    }

    pub fn file_target(&self) -> FileTarget {
        match self.file.as_deref() {
            None => FileTarget::Path(default_log_file()),
            Some("") => FileTarget::Disabled,
            Some(path) => FileTarget::Path(PathBuf::from(path)),
        }
    }
}
