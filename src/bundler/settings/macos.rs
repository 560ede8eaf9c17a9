//! macOS platform-specific settings.

use super::{package::PackageSettings, values::Section};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// macOS application bundle (.app) configuration.
///
/// # Configuration
///
/// ```yaml
/// osx:
///   icon: resources/app.icns
///   identifier: com.example.app
///   executable: build/macos/myapp
///   custom-info: |
///     <key>NSHighResolutionCapable</key>
///     <true/>
/// ```
///
/// # See Also
///
/// - [`WindowsSettings`](super::WindowsSettings) - Windows configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacOsSettings {
    /// Platform-specific files.
    pub package: PackageSettings,

    /// Icon copied into `Contents/Resources` and named by `CFBundleIconFile`.
    ///
    /// Must exist when the settings are loaded.
    pub icon: PathBuf,

    /// `CFBundleIdentifier`, in reverse domain notation.
    pub identifier: String,

    /// Raw plist fragment inserted before the closing `</dict>` of `Info.plist`.
    ///
    /// Inserted verbatim; malformed XML produces a malformed plist.
    ///
    /// Default: Empty
    pub custom_info: String,
}

impl MacOsSettings {
    pub(super) fn from_section(section: &Section<'_>, source_dir: &Path) -> Result<Self> {
        let package = PackageSettings::from_section(section)?;
        let icon = PathBuf::from(section.required_single("icon")?);
        let identifier = section.required_single("identifier")?;

        let resolved = source_dir.join(&icon);
        if !resolved.is_file() {
            return Err(Error::FileNotFound {
                what: "Icon file",
                path: resolved,
            });
        }

        Ok(Self {
            package,
            icon,
            identifier,
            custom_info: section.single("custom-info")?,
        })
    }

    /// Icon file name as it appears inside `Contents/Resources`.
    pub fn icon_file_name(&self) -> String {
        self.icon
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
