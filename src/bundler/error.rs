//! Error types for bundle assembly.
//!
//! Configuration and binary-format failures are fatal and surface immediately.
//! [`Error::InvalidPath`] is the only kind the assembler recovers from: the
//! offending copy source is logged and skipped.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading settings, assembling, or finishing a bundle.
#[derive(Debug, Error)]
pub enum Error {
    /// A required key is absent from the bundle description.
    #[error("Missing key: {section}.{key}")]
    MissingKey {
        /// Section the key belongs to (`global`, `osx`, `windows`, `linux`).
        section: &'static str,
        /// The missing key.
        key: &'static str,
    },

    /// A key is present but holds the wrong kind of value.
    #[error("Expected {expected} value for {section}.{key}")]
    InvalidValue {
        /// Section the key belongs to.
        section: &'static str,
        /// The offending key.
        key: &'static str,
        /// Human readable kind that was expected ("single string", "list", "dict").
        expected: &'static str,
    },

    /// Target name not recognised.
    #[error("Unknown target: {0}. Valid targets: osx, windows, linux")]
    UnknownTarget(String),

    /// No target given and the host platform has no default.
    #[error("Unsupported platform: {0}. Please specify a supported platform explicitly.")]
    UnsupportedHost(String),

    /// Neither the top-level nor the platform section names an executable.
    #[error("No executable defined for target {0}")]
    NoExecutable(String),

    /// A file the bundle depends on does not exist.
    #[error("{what} {} doesn't exist", path.display())]
    FileNotFound {
        /// What the file was supposed to be ("Icon file", "Configuration file", ...).
        what: &'static str,
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A copy source is neither a file nor a directory.
    #[error("Path not valid: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Malformed ICO data.
    #[error("Invalid icon file {}: {reason}", path.display())]
    BinaryFormat {
        /// Icon file being parsed.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// The executable's resource section could not be updated.
    #[error("Resource update failed for {}: {reason}", path.display())]
    ResourceTransaction {
        /// Executable being patched.
        path: PathBuf,
        /// Failure reported by the host.
        reason: String,
    },

    /// File-system failure with the operation and path that caused it.
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// Operation in progress.
        context: &'static str,
        /// Path being operated on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// YAML syntax error in the bundle description.
    #[error("invalid bundle description: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Template rendering failure.
    #[error("{0}")]
    Render(#[from] handlebars::RenderError),

    /// Directory walk failure.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping failure.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Error with added context.
    #[error("{0}: {1:#}")]
    Context(String, anyhow::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Whether assembly may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidPath(_))
    }
}

/// Adds a textual context to failures.
pub trait Context<T> {
    /// Wraps the error (or a `None`) with the given context.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily evaluated variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), e.into()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), e.into()))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attaches the failing operation and path to I/O errors.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
