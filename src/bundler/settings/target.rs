//! Target platform and the directory layout each platform dictates.

use crate::bundler::error::{Error, Result};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Platform a bundle is assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `<name>.app` bundle.
    MacOs,
    /// Plain directory with an `.exe` and patched icon resources.
    Windows,
    /// Plain directory.
    Linux,
}

impl Target {
    /// Every supported target, in CLI listing order.
    pub const ALL: [Target; 3] = [Target::MacOs, Target::Windows, Target::Linux];

    /// Name used on the command line and in the bundle description's section keys.
    pub fn name(self) -> &'static str {
        match self {
            Target::MacOs => "osx",
            Target::Windows => "windows",
            Target::Linux => "linux",
        }
    }

    /// Target matching the platform this binary was compiled for, if any.
    pub fn host() -> Option<Self> {
        if cfg!(target_os = "linux") {
            Some(Target::Linux)
        } else if cfg!(target_os = "windows") {
            Some(Target::Windows)
        } else if cfg!(target_os = "macos") {
            Some(Target::MacOs)
        } else {
            None
        }
    }

    /// Directory layout for a bundle called `name`.
    pub fn layout(self, name: &str) -> BundleLayout {
        BundleLayout::new(self, name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Target::ALL
            .into_iter()
            .find(|target| target.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownTarget(s.to_string()))
    }
}

/// Destination paths of a bundle, relative to the output directory.
///
/// Every path is a pure function of the target and the bundle name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    target: Target,
    base: PathBuf,
}

impl BundleLayout {
    fn new(target: Target, name: &str) -> Self {
        let base = match target {
            Target::MacOs => PathBuf::from(format!("{name}.app")),
            Target::Windows | Target::Linux => PathBuf::from(name),
        };
        Self { target, base }
    }

    /// Top-level output directory, removed wholesale before re-assembly.
    pub fn base_destination(&self) -> &Path {
        &self.base
    }

    /// Directory holding the icon, configuration and data trees.
    pub fn resource_destination(&self) -> PathBuf {
        match self.target {
            Target::MacOs => self.base.join("Contents").join("Resources"),
            Target::Windows | Target::Linux => self.base.clone(),
        }
    }

    /// Directory configuration files are copied into.
    pub fn config_destination(&self) -> PathBuf {
        self.resource_destination().join("config")
    }

    /// Directory data files are copied into.
    pub fn data_destination(&self) -> PathBuf {
        self.resource_destination().join("data")
    }

    /// Directory the executable is copied into.
    pub fn executable_dir(&self) -> PathBuf {
        match self.target {
            Target::MacOs => self.base.join("Contents").join("MacOS"),
            Target::Windows | Target::Linux => self.base.clone(),
        }
    }

    /// Location of `Info.plist`; only meaningful for `.app` bundles.
    pub fn info_plist_path(&self) -> Option<PathBuf> {
        match self.target {
            Target::MacOs => Some(self.base.join("Contents").join("Info.plist")),
            Target::Windows | Target::Linux => None,
        }
    }

    /// Directories that must exist before anything is copied.
    pub fn directories(&self) -> [PathBuf; 3] {
        [
            self.executable_dir(),
            self.config_destination(),
            self.data_destination(),
        ]
    }
}
