//! `Info.plist` generation.
//!
//! Renders the fixed bundle descriptor with Handlebars and writes it to
//! `Contents/Info.plist`.

use super::template::INFO_PLIST_TEMPLATE;
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

/// Values substituted into the `Info.plist` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoPlist {
    /// `CFBundleExecutable`: file name inside `Contents/MacOS`.
    pub executable: String,
    /// `CFBundleIconFile`: file name inside `Contents/Resources`.
    pub icon_file: String,
    /// `CFBundleIdentifier`.
    pub identifier: String,
    /// `CFBundleName`.
    pub name: String,
    /// `CFBundleShortVersionString` and `CFBundleVersion`.
    pub version: String,
    /// Raw XML inserted before `</dict>`.
    pub custom: String,
}

impl InfoPlist {
    /// Collects the template values from macOS settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let macos = settings.macos().ok_or_else(|| {
            Error::GenericError(format!(
                "Info.plist requested for a {} bundle",
                settings.target()
            ))
        })?;

        Ok(Self {
            executable: settings.executable_file_name()?,
            icon_file: macos.icon_file_name(),
            identifier: macos.identifier.clone(),
            name: settings.name().to_string(),
            version: settings.version().to_string(),
            custom: macos.custom_info.clone(),
        })
    }

    /// Renders the document.
    ///
    /// The custom fragment is not validated; malformed XML there yields a
    /// malformed plist.
    pub fn render(&self) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("Info.plist", INFO_PLIST_TEMPLATE)
            .map_err(|e| Error::GenericError(format!("failed to register Info.plist template: {}", e)))?;

        Ok(handlebars.render("Info.plist", self)?)
    }

    /// Renders the document and writes it to `path`.
    pub async fn write(&self, path: &Path) -> Result<()> {
        let contents = self.render()?;
        tokio::fs::write(path, contents)
            .await
            .fs_context("writing Info.plist", path)
    }
}
