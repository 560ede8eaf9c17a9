//! Windows application directory finishing.
//!
//! Embeds the configured `.ico` into the bundled executable.
//!
//! # Module Organization
//!
//! - `ico` - ICO parsing and `GRPICON` serialisation (portable)
//! - `patcher` - Host resource-update API behind the [`IconPatcher`] trait

pub mod ico;
mod patcher;

pub use ico::{IcoDirectoryEntry, IcoImage, IconFile, IconGroup};
#[cfg(windows)]
pub use patcher::Win32IconPatcher;
pub use patcher::{IconPatcher, MAIN_ICON, UnsupportedHostPatcher, host_patcher};

use crate::{
    bail,
    bundler::{
        error::{Error, Result},
        settings::Settings,
    },
};
use std::path::{Path, PathBuf};

/// Writes the configured icon into the executable copied under `output_dir`.
///
/// The ICO file is parsed completely before the patcher runs, so a malformed
/// icon never leaves a half-written executable behind.
///
/// # Returns
///
/// Path of the patched executable.
pub async fn finish(
    settings: &Settings,
    output_dir: &Path,
    patcher: &dyn IconPatcher,
) -> Result<PathBuf> {
    let Some(windows) = settings.windows() else {
        bail!("Windows finishing requested for a {} bundle", settings.target());
    };

    let executable = output_dir.join(settings.executable_destination()?);
    if !executable.is_file() {
        return Err(Error::FileNotFound {
            what: "Executable",
            path: executable,
        });
    }

    let icon = IconFile::read(&settings.resolve(&windows.icon)).await?;
    let group = IconGroup::new(icon);
    log::debug!(
        "Embedding {} icon images into {}",
        group.len(),
        executable.display()
    );

    patcher.patch(&executable, &group)?;

    log::info!("Set icon of {}", executable.display());
    Ok(executable)
}
