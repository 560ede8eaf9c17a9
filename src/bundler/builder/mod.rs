//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns validated
//! [`Settings`](crate::bundler::Settings) into a bundle on disk.
//!
//! # Overview
//!
//! The bundler:
//! 1. Removes any previous bundle at the base destination
//! 2. Creates the executable, config and data directories
//! 3. Copies configuration files, data files and the executable
//! 4. Runs the platform finisher (Info.plist on macOS, icon resources on Windows)
//!
//! # Example
//!
//! ```no_run
//! use ada_bundler::bundler::{Bundler, SettingsBuilder, Target};
//!
//! # async fn example() -> ada_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new(Target::Linux).load("bundle.yaml").await?;
//! let artifact = Bundler::new(settings, ".").bundle().await?;
//! println!("Created {}", artifact.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`assembly`] - Copying source paths with per-item diagnostics
//! - [`orchestrator`] - Main [`Bundler`] struct

pub mod assembly;
mod orchestrator;

pub use assembly::AssemblyReport;
pub use orchestrator::{BundledArtifact, Bundler};
