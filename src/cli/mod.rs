//! Command line interface for ada-bundler.
//!
//! [`run`] takes everything it depends on from the process through
//! [`Environment`], so tests can drive a full bundle run against a temporary
//! working directory and a recording icon patcher.

mod args;

pub use args::Args;

use crate::bundler::{Bundler, Error, IconPatcher, SettingsBuilder, Target, host_patcher};
use crate::error::{CliError, Result};
use std::{path::PathBuf, sync::Arc};

/// Process state a bundle run depends on.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directory the configuration, source paths and output are relative to.
    pub working_dir: PathBuf,
    /// Target used when none is given on the command line.
    pub host: Option<Target>,
    /// Writes icon resources into Windows executables.
    pub icon_patcher: Arc<dyn IconPatcher>,
}

impl Environment {
    /// Captures the current directory, host platform and host icon patcher.
    pub fn from_process() -> Result<Self> {
        Ok(Self {
            working_dir: std::env::current_dir()?,
            host: Target::host(),
            icon_patcher: host_patcher(),
        })
    }

    /// Environment rooted at `working_dir` with no host target and the
    /// host's icon patcher.
    pub fn new<P: Into<PathBuf>>(working_dir: P) -> Self {
        Self {
            working_dir: working_dir.into(),
            host: None,
            icon_patcher: host_patcher(),
        }
    }

    /// Sets the fallback target.
    pub fn with_host(mut self, host: Target) -> Self {
        self.host = Some(host);
        self
    }

    /// Replaces the icon patcher.
    pub fn with_icon_patcher(mut self, patcher: Arc<dyn IconPatcher>) -> Self {
        self.icon_patcher = patcher;
        self
    }
}

/// Main CLI entry point
///
/// Loads the bundle description, assembles the bundle for the requested (or
/// host) target into the working directory and returns the exit code.
pub async fn run(args: Args, env: &Environment) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let target = args
        .requested_target()
        .or(env.host)
        .ok_or_else(|| Error::UnsupportedHost(std::env::consts::OS.to_string()))?;

    let config = env.working_dir.join(&args.config);
    log::info!("Bundling {} for {}", config.display(), target);

    let settings = SettingsBuilder::new(target)
        .source_dir(&env.working_dir)
        .load(&config)
        .await?;

    let artifact = Bundler::new(settings, &env.working_dir)
        .with_icon_patcher(env.icon_patcher.clone())
        .bundle()
        .await?;

    if !artifact.report.is_complete() {
        log::warn!(
            "{} source path(s) were skipped: {}",
            artifact.report.skipped.len(),
            artifact
                .report
                .skipped
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BundlerError;
    use clap::Parser;
    use std::fs;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ada-bundler").chain(argv.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn bundles_for_host_when_no_target_given() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bundle.yaml"),
            "name: Foo\nversion: '1.0'\nexecutable: foo\n",
        )
        .unwrap();
        fs::write(dir.path().join("foo"), b"#!/bin/sh\n").unwrap();

        let env = Environment::new(dir.path()).with_host(Target::Linux);
        let code = run(args(&[]), &env).await.unwrap();

        assert_eq!(code, 0);
        assert!(dir.path().join("Foo/foo").is_file());
    }

    #[tokio::test]
    async fn no_target_and_no_host_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(&[]), &Environment::new(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BundlerError::Bundler(Error::UnsupportedHost(_))
        ));
    }

    #[tokio::test]
    async fn unknown_target_is_rejected_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(&["bundle.yaml", "amiga"]), &Environment::new(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, BundlerError::Cli(CliError::InvalidArguments { .. })));
    }

    #[tokio::test]
    async fn missing_configuration_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(&["missing.yaml", "linux"]), &Environment::new(dir.path()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
        assert!(err.to_string().starts_with("Configuration file"));
    }
}
