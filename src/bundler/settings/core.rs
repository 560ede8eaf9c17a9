//! Core Settings struct and implementations.

use super::{
    BundleLayout, LinuxSettings, MacOsSettings, PackageSettings, Target, WindowsSettings,
    windows::with_exe_suffix,
};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Platform-specific part of the bundle description, for the selected target only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformSettings {
    /// `osx` section.
    MacOs(MacOsSettings),
    /// `windows` section.
    Windows(WindowsSettings),
    /// `linux` section.
    Linux(LinuxSettings),
}

impl PlatformSettings {
    /// File lists declared inside the platform section.
    pub fn package(&self) -> &PackageSettings {
        match self {
            PlatformSettings::MacOs(settings) => &settings.package,
            PlatformSettings::Windows(settings) => &settings.package,
            PlatformSettings::Linux(settings) => &settings.package,
        }
    }
}

/// Validated bundle description for one target.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Once built,
/// every required key is present and the target's icon exists on disk.
///
/// Source paths from the description are resolved against
/// [`Settings::source_dir`]; destination paths are relative to the output
/// directory and come from the [`BundleLayout`].
#[derive(Clone, Debug)]
pub struct Settings {
    target: Target,
    name: String,
    version: String,
    package: PackageSettings,
    platform: PlatformSettings,
    source_dir: PathBuf,
    layout: BundleLayout,
}

impl Settings {
    pub(super) fn new(
        target: Target,
        name: String,
        version: String,
        package: PackageSettings,
        platform: PlatformSettings,
        source_dir: PathBuf,
    ) -> Self {
        let layout = target.layout(&name);
        Self {
            target,
            name,
            version,
            package,
            platform,
            source_dir,
            layout,
        }
    }

    /// Returns the target platform.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the bundle name (destination directory stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the directory relative source paths are resolved against.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the platform-specific settings.
    pub fn platform(&self) -> &PlatformSettings {
        &self.platform
    }

    /// Returns the macOS settings when targeting macOS.
    pub fn macos(&self) -> Option<&MacOsSettings> {
        match &self.platform {
            PlatformSettings::MacOs(settings) => Some(settings),
            _ => None,
        }
    }

    /// Returns the Windows settings when targeting Windows.
    pub fn windows(&self) -> Option<&WindowsSettings> {
        match &self.platform {
            PlatformSettings::Windows(settings) => Some(settings),
            _ => None,
        }
    }

    /// Returns the destination layout.
    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    /// Top-level output directory.
    pub fn base_destination(&self) -> &Path {
        self.layout.base_destination()
    }

    /// Directory holding icon, configuration and data.
    pub fn resource_destination(&self) -> PathBuf {
        self.layout.resource_destination()
    }

    /// Directory configuration files land in.
    pub fn config_destination(&self) -> PathBuf {
        self.layout.config_destination()
    }

    /// Directory data files land in.
    pub fn data_destination(&self) -> PathBuf {
        self.layout.data_destination()
    }

    /// Directory the executable lands in.
    pub fn executable_dir(&self) -> PathBuf {
        self.layout.executable_dir()
    }

    /// Resolves a path from the bundle description against the source directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.source_dir.join(path)
    }

    /// Configuration sources: top-level entries, then platform entries.
    pub fn config_files(&self) -> Vec<PathBuf> {
        self.merged(&self.package.configuration, &self.platform.package().configuration)
    }

    /// Data sources: top-level entries, then platform entries.
    pub fn data_files(&self) -> Vec<PathBuf> {
        self.merged(&self.package.data, &self.platform.package().data)
    }

    fn merged(&self, global: &[String], platform: &[String]) -> Vec<PathBuf> {
        global
            .iter()
            .chain(platform)
            .map(|path| self.resolve(path))
            .collect()
    }

    /// Source path of the executable.
    ///
    /// The top-level `executable` takes precedence over the platform section's.
    /// On Windows the path receives an implicit `.exe` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoExecutable`] if neither is set.
    pub fn executable(&self) -> Result<PathBuf> {
        let declared = [&self.package.executable, &self.platform.package().executable]
            .into_iter()
            .find(|executable| !executable.is_empty())
            .ok_or_else(|| Error::NoExecutable(self.target.to_string()))?;

        let executable = match self.target {
            Target::Windows => with_exe_suffix(declared),
            Target::MacOs | Target::Linux => declared.clone(),
        };
        Ok(self.resolve(executable))
    }

    /// File name of the executable inside the bundle.
    pub fn executable_file_name(&self) -> Result<String> {
        let executable = self.executable()?;
        executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::NoExecutable(self.target.to_string()))
    }

    /// Destination of the executable, relative to the output directory.
    pub fn executable_destination(&self) -> Result<PathBuf> {
        Ok(self.executable_dir().join(self.executable_file_name()?))
    }
}
