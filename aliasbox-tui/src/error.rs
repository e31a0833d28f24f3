//! Error types for aliasbox-tui
//!
//! Wraps library errors and terminal IO errors so `main` has a single
//! error type to report.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Library error (config, database, runtime)
    #[error("{0}")]
    Aliasbox(#[from] libaliasbox::AliasboxError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl TuiError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Aliasbox(e) => e.exit_code(),
            TuiError::Terminal(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
