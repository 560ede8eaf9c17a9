//! Bundle assembly.
//!
//! Turns a YAML bundle description into an OSX `.app` bundle or a
//! Windows/Linux application directory.
//!
//! # Module Organization
//!
//! - [`settings`] - Bundle description loading and validation
//! - [`builder`] - The [`Bundler`] orchestrator and file assembly
//! - [`platform`] - macOS `Info.plist` and Windows icon resources
//! - [`utils`] - File system helpers

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{AssemblyReport, BundledArtifact, Bundler};
pub use error::{Error, Result};
pub use platform::windows::{IconPatcher, UnsupportedHostPatcher, host_patcher};
pub use settings::{
    BundleLayout, LinuxSettings, MacOsSettings, PackageSettings, PlatformSettings, Settings,
    SettingsBuilder, Target, WindowsSettings,
};
