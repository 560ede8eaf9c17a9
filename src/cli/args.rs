//! Command line argument parsing and validation.

use crate::bundler::Target;
use clap::Parser;
use std::path::PathBuf;

/// Application bundle assembler
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ada-bundler",
    version,
    about = "Assembles application bundles from a YAML description",
    long_about = "Copies configuration files, data and the executable described in a bundle
description into an OSX .app bundle or a Windows/Linux directory, then writes
Info.plist (OSX) or embeds the application icon (Windows).

Usage:
  ada-bundler
  ada-bundler bundle.yaml osx
  ada-bundler release/bundle.yaml windows

The bundle is written to the working directory. Exit code 0 = bundle assembled."
)]
pub struct Args {
    /// Bundle description, relative to the working directory
    #[arg(value_name = "CONFIG", default_value = "bundle.yaml")]
    pub config: PathBuf,

    /// Target platform: osx, windows or linux (default: the host platform)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.config.as_os_str().is_empty() {
            return Err("Configuration path cannot be empty".to_string());
        }

        if let Some(target) = &self.target
            && target.parse::<Target>().is_err()
        {
            let valid: Vec<_> = Target::ALL.iter().map(|t| t.name()).collect();
            return Err(format!(
                "Invalid target: {}. Valid targets: {}",
                target,
                valid.join(", ")
            ));
        }

        Ok(())
    }

    /// The explicitly requested target, if any.
    ///
    /// Returns `None` when no target was given or the name is not one of
    /// [`Target::ALL`]; [`Args::validate`] reports the latter.
    pub fn requested_target(&self) -> Option<Target> {
        self.target.as_deref().and_then(|t| t.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundle_yaml_and_host() {
        let args = Args::try_parse_from(["ada-bundler"]).unwrap();
        assert_eq!(args.config, PathBuf::from("bundle.yaml"));
        assert!(args.target.is_none());
        assert!(args.validate().is_ok());
        assert_eq!(args.requested_target(), None);
    }

    #[test]
    fn target_is_case_insensitive() {
        let args = Args::try_parse_from(["ada-bundler", "app.yaml", "OSX"]).unwrap();
        assert_eq!(args.config, PathBuf::from("app.yaml"));
        assert_eq!(args.requested_target(), Some(Target::MacOs));
    }

    #[test]
    fn unknown_target_fails_validation() {
        let args = Args::try_parse_from(["ada-bundler", "bundle.yaml", "beos"]).unwrap();
        let reason = args.validate().unwrap_err();
        assert!(reason.contains("beos"));
        assert!(reason.contains("osx, windows, linux"));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Args::try_parse_from(["ada-bundler", "a.yaml", "linux", "extra"]).is_err());
    }
}
