//! Configuration structures for bundle assembly.
//!
//! This module turns the YAML bundle description into validated, per-target
//! [`Settings`]: required keys are checked, types are enforced, the selected
//! platform's icon is verified to exist, and every destination path is derived
//! from the [`Target`] and bundle name.

mod builder;
mod core;
mod linux;
mod macos;
mod package;
mod target;
mod values;
mod windows;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use self::core::{PlatformSettings, Settings};
pub use linux::LinuxSettings;
pub use macos::MacOsSettings;
pub use package::PackageSettings;
pub use target::{BundleLayout, Target};
pub use self::windows::WindowsSettings;
