//! Copying source paths into the bundle.

use crate::bundler::{
    error::{Error, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Outcome of copying source paths into a bundle.
///
/// Sources that are neither files nor directories do not abort assembly; they
/// are collected in [`AssemblyReport::skipped`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Destination of every copied file or directory, in copy order.
    pub copied: Vec<PathBuf>,
    /// Sources that were skipped as invalid.
    pub skipped: Vec<PathBuf>,
}

impl AssemblyReport {
    /// Whether every source was copied.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Copies each source into `destination`, keeping its file or directory name.
///
/// Files are copied as files, directories recursively. Invalid sources are
/// logged, recorded as skipped, and the remaining sources are still copied.
///
/// # Errors
///
/// Any failure other than an invalid source, e.g. a permission error while
/// writing into `destination`.
pub async fn copy_paths(
    sources: &[PathBuf],
    destination: &Path,
    report: &mut AssemblyReport,
) -> Result<()> {
    for source in sources {
        log::info!("Copying {}", source.display());
        match copy_into(source, destination).await {
            Ok(copied) => report.copied.push(copied),
            Err(e) if e.is_recoverable() => {
                log::warn!("{}", e);
                report.skipped.push(source.clone());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn copy_into(source: &Path, destination: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| Error::InvalidPath(source.to_path_buf()))?;
    let target = destination.join(name);

    if source.is_file() {
        fs::copy_file(source, &target).await?;
    } else if source.is_dir() {
        fs::copy_dir(source, &target).await?;
    } else {
        return Err(Error::InvalidPath(source.to_path_buf()));
    }
    Ok(target)
}
