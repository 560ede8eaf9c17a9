//! Windows platform-specific settings.

use super::{package::PackageSettings, values::Section};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Windows application directory configuration.
///
/// # Configuration
///
/// ```yaml
/// windows:
///   icon: resources/app.ico
///   executable: build/windows/myapp
/// ```
///
/// The executable path receives an implicit `.exe` suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowsSettings {
    /// Platform-specific files.
    pub package: PackageSettings,

    /// `.ico` file written into the executable's resources as `MAINICON`.
    ///
    /// Must exist when the settings are loaded.
    pub icon: PathBuf,
}

impl WindowsSettings {
    pub(super) fn from_section(section: &Section<'_>, source_dir: &Path) -> Result<Self> {
        let package = PackageSettings::from_section(section)?;
        let icon = PathBuf::from(section.required_single("icon")?);

        let resolved = source_dir.join(&icon);
        if !resolved.is_file() {
            return Err(Error::FileNotFound {
                what: "Icon file",
                path: resolved,
            });
        }

        Ok(Self { package, icon })
    }
}

/// Appends `.exe` unless the path already carries it.
pub(super) fn with_exe_suffix(executable: &str) -> String {
    let has_suffix = Path::new(executable)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"));
    if has_suffix {
        executable.to_string()
    } else {
        format!("{executable}.exe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exe_suffix_is_added_once() {
        assert_eq!(with_exe_suffix("build/foo"), "build/foo.exe");
        assert_eq!(with_exe_suffix("build/foo.exe"), "build/foo.exe");
        assert_eq!(with_exe_suffix("FOO.EXE"), "FOO.EXE");
        assert_eq!(with_exe_suffix("foo.bin"), "foo.bin.exe");
    }
}
