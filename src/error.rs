//! Top-level error types for the CLI.
//!
//! Bundler failures, argument problems and environment errors all funnel into
//! [`BundlerError`], which `main` prints before exiting non-zero.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;
        match self {
            BundlerError::Bundler(E::MissingKey { section, key }) => {
                vec![format!("Add `{key}` to the {section} section of the bundle description")]
            }
            BundlerError::Bundler(E::InvalidValue { key: "name", .. }) => {
                vec!["`name` becomes the bundle directory; use a plain name without `/`, `.` or `..`".to_string()]
            }
            BundlerError::Bundler(E::InvalidValue { .. }) => {
                vec!["Lists are written as `[a, b]` or one `- item` per line; versions must be quoted strings".to_string()]
            }
            BundlerError::Bundler(E::UnsupportedHost(_)) | BundlerError::Cli(_) => {
                vec!["Pass the target explicitly: osx, windows or linux".to_string()]
            }
            BundlerError::Bundler(E::FileNotFound { .. }) => {
                vec!["Relative paths in the bundle description are resolved against the working directory".to_string()]
            }
            _ => Vec::new(),
        }
    }
}
