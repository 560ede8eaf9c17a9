//! File lists shared by the top level and every platform section.

use super::values::Section;
use crate::bundler::error::Result;

/// What to copy into a bundle.
///
/// Appears once at the top level of the bundle description and once per
/// platform section; the effective lists are the top-level entries followed by
/// the selected platform's entries.
///
/// # Configuration
///
/// ```yaml
/// configuration:
///   - config/defaults.ini
/// data:
///   - assets
/// executable: build/myapp
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSettings {
    /// Files or directories copied into the `config` directory.
    ///
    /// Default: Empty
    pub configuration: Vec<String>,

    /// Files or directories copied into the `data` directory.
    ///
    /// Default: Empty
    pub data: Vec<String>,

    /// Path of the executable to bundle.
    ///
    /// Default: Empty (none)
    pub executable: String,
}

impl PackageSettings {
    pub(super) fn from_section(section: &Section<'_>) -> Result<Self> {
        Ok(Self {
            configuration: section.list("configuration")?,
            data: section.list("data")?,
            executable: section.single("executable")?,
        })
    }
}
