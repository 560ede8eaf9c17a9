//! Linux platform-specific settings.

use super::{package::PackageSettings, values::Section};
use crate::bundler::error::Result;

/// Linux application directory configuration.
///
/// Linux has no extras beyond the shared file lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinuxSettings {
    /// Platform-specific files.
    pub package: PackageSettings,
}

impl LinuxSettings {
    pub(super) fn from_section(section: &Section<'_>) -> Result<Self> {
        Ok(Self {
            package: PackageSettings::from_section(section)?,
        })
    }
}
