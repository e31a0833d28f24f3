//! Centralized logging configuration for all aliasbox binaries
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Logging to a file instead of stderr (the TUI owns the terminal)
//!
//! # Examples
//!
//! ```no_run
//! use libaliasbox::logging::{LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false);
//! config.init().unwrap();
//!
//! // Or use default settings (respects env vars)
//! libaliasbox::logging::init_default();
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
            file: None,
        }
    }

    /// Send log output to `path` (created if missing, appended otherwise)
    pub fn with_file(self, path: PathBuf) -> Self {
        Self {
            file: Some(path),
            ..self
        }
    }

    fn filter(&self) -> EnvFilter {
        let fallback = if self.verbose { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }

    /// Initialize logging with the configured settings
    ///
    /// Call once at the start of the program. A second call is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened.
    pub fn init(&self) -> Result<()> {
        match &self.file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(ConfigError::WriteError)?;
                self.install(Mutex::new(file), false);
            }
            None => self.install(std::io::stderr, true),
        }
        Ok(())
    }

    fn install<W>(&self, writer: W, ansi: bool)
    where
        W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
    {
        let filter = self.filter();

        let result = match self.format {
            LogFormat::Json => {
                // One JSON object per line
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .try_init()
            }
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };

        if result.is_err() {
            tracing::debug!("logging already initialized");
        }
    }
}

/// Build a logging config from `ALIASBOX_LOG_FORMAT` and `ALIASBOX_LOG_LEVEL`
///
/// Falls back to text format with `fallback_level` if not set.
pub fn config_from_env(fallback_level: &str) -> LoggingConfig {
    let format = std::env::var("ALIASBOX_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level =
        std::env::var("ALIASBOX_LOG_LEVEL").unwrap_or_else(|_| fallback_level.to_string());

    LoggingConfig::new(format, level, false)
}

/// Initialize stderr logging with default settings
///
/// # Examples
///
/// ```bash
/// export ALIASBOX_LOG_FORMAT=json
/// export ALIASBOX_LOG_LEVEL=debug
/// aliasbox new shop
/// ```
pub fn init_default() {
    // stderr logging cannot fail to open
    let _ = config_from_env("info").init();
}
