//! macOS `.app` bundle finishing.
//!
//! Copies the icon into `Contents/Resources` and writes `Contents/Info.plist`.

mod info_plist;
mod template;

pub use info_plist::InfoPlist;

use crate::{
    bail,
    bundler::{
        error::{Error, Result},
        settings::Settings,
        utils::fs,
    },
};
use std::path::{Path, PathBuf};

/// Finishes an assembled `.app` bundle under `output_dir`.
///
/// # Returns
///
/// Path of the written `Info.plist`.
pub async fn finish(settings: &Settings, output_dir: &Path) -> Result<PathBuf> {
    let Some(macos) = settings.macos() else {
        bail!("macOS finishing requested for a {} bundle", settings.target());
    };

    let icon = settings.resolve(&macos.icon);
    let icon_dest = output_dir
        .join(settings.resource_destination())
        .join(macos.icon_file_name());
    log::info!("Copying {}", icon.display());
    fs::copy_file(&icon, &icon_dest).await?;

    let plist_path = settings
        .layout()
        .info_plist_path()
        .map(|path| output_dir.join(path))
        .ok_or_else(|| Error::GenericError("bundle layout has no Info.plist".into()))?;
    InfoPlist::from_settings(settings)?.write(&plist_path).await?;

    log::info!("Wrote {}", plist_path.display());
    Ok(plist_path)
}
