//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that assembles the bundle
//! directory and hands it to the platform finisher.

use super::assembly::{AssemblyReport, copy_paths};
use crate::bundler::{
    Result, Settings, Target,
    platform::{
        macos,
        windows::{self, IconPatcher, host_patcher},
    },
    utils::fs,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Result of a completed bundle assembly.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Target the bundle was assembled for.
    pub target: Target,
    /// Base directory of the bundle (`<name>.app` or `<name>`).
    pub path: PathBuf,
    /// Where the executable ended up.
    pub executable: PathBuf,
    /// What was copied and what was skipped.
    pub report: AssemblyReport,
}

/// Main bundler orchestrator.
///
/// Performs exactly one assembly per [`Bundler::bundle`] call. Any previous
/// output at the bundle's base destination is deleted first.
///
/// # Platform Support
///
/// - **macOS**: `<name>.app` with `Info.plist` and icon
/// - **Windows**: `<name>/` with the icon embedded in `<exe>.exe`
/// - **Linux**: `<name>/`
///
/// # Examples
///
/// ```no_run
/// use ada_bundler::bundler::{Bundler, Settings, UnsupportedHostPatcher};
/// use std::sync::Arc;
///
/// # async fn example(settings: Settings) -> ada_bundler::bundler::Result<()> {
/// let bundler = Bundler::new(settings, "dist")
///     .with_icon_patcher(Arc::new(UnsupportedHostPatcher));
/// let artifact = bundler.bundle().await?;
/// if !artifact.report.is_complete() {
///     eprintln!("skipped: {:?}", artifact.report.skipped);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Bundler {
    settings: Settings,
    output_dir: PathBuf,
    icon_patcher: Arc<dyn IconPatcher>,
}

impl std::fmt::Debug for Bundler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("output_dir", &self.output_dir)
            .field("icon_patcher", &self.icon_patcher)
            .finish()
    }
}

impl Bundler {
    /// Creates a bundler writing under `output_dir`, patching icons with the
    /// host's patcher.
    pub fn new<P: AsRef<Path>>(settings: Settings, output_dir: P) -> Self {
        Self {
            settings,
            output_dir: output_dir.as_ref().to_path_buf(),
            icon_patcher: host_patcher(),
        }
    }

    /// Replaces the icon patcher used for Windows bundles.
    pub fn with_icon_patcher(mut self, patcher: Arc<dyn IconPatcher>) -> Self {
        self.icon_patcher = patcher;
        self
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the directory bundles are written under.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Assembles and finishes the bundle.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let (executable, report) = self.assemble().await?;
        self.finish().await?;

        let path = self.output_dir.join(self.settings.base_destination());
        log::info!(
            "Created {} bundle {}",
            self.settings.target(),
            path.display()
        );

        Ok(BundledArtifact {
            target: self.settings.target(),
            path,
            executable,
            report,
        })
    }

    /// Recreates the bundle directory tree and copies every source into it.
    ///
    /// # Returns
    ///
    /// Destination of the executable and the copy report.
    pub async fn assemble(&self) -> Result<(PathBuf, AssemblyReport)> {
        let settings = &self.settings;
        // Resolve before anything destructive happens.
        let executable = settings.executable()?;
        let executable_dest = self.output_dir.join(settings.executable_destination()?);

        let base = self.output_dir.join(settings.base_destination());
        if fs::remove_dir_all(&base).await? {
            log::info!("Removed previous bundle {}", base.display());
        }

        for dir in settings.layout().directories() {
            fs::create_dir_all(&self.output_dir.join(dir)).await?;
        }

        let mut report = AssemblyReport::default();
        copy_paths(
            &settings.config_files(),
            &self.output_dir.join(settings.config_destination()),
            &mut report,
        )
        .await?;
        copy_paths(
            &settings.data_files(),
            &self.output_dir.join(settings.data_destination()),
            &mut report,
        )
        .await?;
        copy_paths(
            std::slice::from_ref(&executable),
            &self.output_dir.join(settings.executable_dir()),
            &mut report,
        )
        .await?;

        if settings.target() != Target::Windows && executable_dest.is_file() {
            fs::set_executable(&executable_dest).await?;
        }

        Ok((executable_dest, report))
    }

    /// Runs the platform-specific finishing step on an assembled bundle.
    ///
    /// # Returns
    ///
    /// The file the finisher wrote (`Info.plist` or the patched executable),
    /// or `None` for Linux.
    pub async fn finish(&self) -> Result<Option<PathBuf>> {
        let written = match self.settings.target() {
            Target::MacOs => Some(macos::finish(&self.settings, &self.output_dir).await?),
            Target::Windows => Some(
                windows::finish(&self.settings, &self.output_dir, self.icon_patcher.as_ref())
                    .await?,
            ),
            Target::Linux => None,
        };
        Ok(written)
    }
}
