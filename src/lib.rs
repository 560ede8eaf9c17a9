//! Application bundle assembler.
//!
//! This library assembles platform-specific application bundles from a
//! declarative YAML description:
//! - macOS `.app` bundles with a generated `Info.plist`
//! - Windows directories with the icon embedded in the executable
//! - Linux directories
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
