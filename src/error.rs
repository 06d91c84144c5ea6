//! Global error handling for filegather
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

use crate::export::ExportError;
use crate::scanner::ScanError;

/// Global error type for filegather operations
#[derive(Error, Debug)]
pub enum FileGatherError {
    /// Directory listing errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Specialized Result type for filegather operations
pub type Result<T> = std::result::Result<T, FileGatherError>;

/// Creates a FileGatherError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FileGatherError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for attaching a terminal context to errors
pub trait ResultExt<T> {
    /// Wrap the error as a terminal error with the given context
    fn terminal_context(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn terminal_context(self, context: &str) -> Result<T> {
        self.map_err(|e| FileGatherError::Terminal(format!("{}: {}", context, e)))
    }
}
