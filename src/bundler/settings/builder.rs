//! Builder for constructing Settings from a bundle description.

use super::{
    LinuxSettings, MacOsSettings, PackageSettings, PlatformSettings, Settings, Target,
    WindowsSettings, values::Section,
};
use crate::bundler::error::{Error, ErrorExt, Result};
use serde_yaml::{Mapping, Value};
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use ada_bundler::bundler::{SettingsBuilder, Target};
///
/// # async fn example() -> ada_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new(Target::Linux)
///     .source_dir("/work/myapp")
///     .load("/work/myapp/bundle.yaml")
///     .await?;
/// println!("bundling {} {}", settings.name(), settings.version());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    target: Target,
    source_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a builder for the given target.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            source_dir: None,
        }
    }

    /// Sets the directory relative source paths are resolved against.
    ///
    /// Default: the process working directory.
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Reads and validates the bundle description at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::FileNotFound`] if the file cannot be opened, otherwise any
    /// validation error from [`SettingsBuilder::parse`].
    pub async fn load<P: AsRef<Path>>(self, path: P) -> Result<Settings> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound {
                    what: "Configuration file",
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e).fs_context("reading configuration file", path),
        };

        self.parse(&contents)
    }

    /// Validates a bundle description given as YAML text.
    ///
    /// # Errors
    ///
    /// - [`Error::Yaml`] for syntax errors
    /// - [`Error::MissingKey`] / [`Error::InvalidValue`] naming the offending key
    /// - [`Error::FileNotFound`] if the target's icon does not exist
    pub fn parse(self, contents: &str) -> Result<Settings> {
        if contents.trim().is_empty() {
            return self.build(&Mapping::new());
        }
        let document: Value = serde_yaml::from_str(contents)?;
        let root = match document {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(Error::InvalidValue {
                    section: "global",
                    key: "<document>",
                    expected: "dict",
                });
            }
        };
        self.build(&root)
    }

    fn build(self, root: &Mapping) -> Result<Settings> {
        let source_dir = self.source_dir.unwrap_or_default();
        let global = Section::new("global", root);

        let name = global.required_single("name")?;
        if !is_directory_name(&name) {
            return Err(Error::InvalidValue {
                section: "global",
                key: "name",
                expected: "plain directory name",
            });
        }
        let version = global.required_single("version")?;
        let package = PackageSettings::from_section(&global)?;

        let mut platform = None;
        for target in Target::ALL {
            let section = global.dict(target.name())?;
            if target != self.target {
                continue;
            }
            let empty = Mapping::new();
            let section = section.unwrap_or_else(|| Section::new(target.name(), &empty));
            platform = Some(match target {
                Target::MacOs => {
                    PlatformSettings::MacOs(MacOsSettings::from_section(&section, &source_dir)?)
                }
                Target::Windows => PlatformSettings::Windows(WindowsSettings::from_section(
                    &section,
                    &source_dir,
                )?),
                Target::Linux => PlatformSettings::Linux(LinuxSettings::from_section(&section)?),
            });
        }
        let platform = platform.ok_or_else(|| Error::UnknownTarget(self.target.to_string()))?;

        log::debug!(
            "Loaded settings for {} {} targeting {}",
            name,
            version,
            self.target
        );

        Ok(Settings::new(
            self.target,
            name,
            version,
            package,
            platform,
            source_dir,
        ))
    }
}

/// The bundle's base directory is removed before assembly, so the name must
/// stay one component below the output directory.
fn is_directory_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn linux(yaml: &str) -> Result<Settings> {
        SettingsBuilder::new(Target::Linux).parse(yaml)
    }

    #[test]
    fn missing_version_is_named() {
        let err = linux("name: Foo\n").unwrap_err();
        assert_eq!(err.to_string(), "Missing key: global.version");
    }

    #[test]
    fn name_must_be_a_single_directory_component() {
        for name in ["''", "'.'", "'..'", "/abs", "../x", "a/b"] {
            let err = linux(&format!("name: {name}\nversion: '1'\n")).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Expected plain directory name value for global.name",
                "name {name}"
            );
        }
        assert!(linux("name: My App\nversion: '1'\n").is_ok());
    }

    #[test]
    fn empty_document_fails_on_name() {
        let err = linux("").unwrap_err();
        assert_eq!(err.to_string(), "Missing key: global.name");
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        let err = linux("- a\n- b\n").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { expected: "dict", .. }));
    }

    #[test]
    fn linux_layout_for_simple_description() {
        let settings = linux("name: Foo\nversion: \"1.0\"\nexecutable: foo\n").unwrap();
        assert_eq!(settings.name(), "Foo");
        assert_eq!(settings.version(), "1.0");
        assert_eq!(
            settings.executable_destination().unwrap(),
            Path::new("Foo/foo")
        );
    }

    #[test]
    fn lists_merge_global_then_platform() {
        let settings = SettingsBuilder::new(Target::Linux)
            .source_dir("/src")
            .parse(
                "name: Foo\nversion: '1'\nconfiguration: [a.ini]\ndata: [assets]\n\
                 linux:\n  configuration: [b.ini]\n  data: [linux-assets]\n\
                 windows:\n  configuration: [ignored.ini]\n",
            )
            .unwrap();
        assert_eq!(
            settings.config_files(),
            vec![PathBuf::from("/src/a.ini"), PathBuf::from("/src/b.ini")]
        );
        assert_eq!(
            settings.data_files(),
            vec![
                PathBuf::from("/src/assets"),
                PathBuf::from("/src/linux-assets")
            ]
        );
    }

    #[test]
    fn other_platform_sections_are_not_required() {
        // No osx/windows icon needed when bundling for Linux.
        let settings = linux("name: Foo\nversion: '1'\nosx:\n  identifier: x\n").unwrap();
        assert_eq!(settings.target(), Target::Linux);
        assert!(settings.macos().is_none());
    }

    #[test]
    fn other_platform_sections_must_still_be_mappings() {
        let err = linux("name: Foo\nversion: '1'\nwindows: app.ico\n").unwrap_err();
        assert_eq!(err.to_string(), "Expected dict value for global.windows");
    }

    #[test]
    fn top_level_executable_wins() {
        let settings = linux(
            "name: Foo\nversion: '1'\nexecutable: bin/top\nlinux:\n  executable: bin/platform\n",
        )
        .unwrap();
        assert_eq!(settings.executable_file_name().unwrap(), "top");
    }

    #[test]
    fn platform_executable_is_the_fallback() {
        let settings = linux("name: Foo\nversion: '1'\nlinux:\n  executable: bin/platform\n")
            .unwrap();
        assert_eq!(settings.executable_file_name().unwrap(), "platform");
    }

    #[test]
    fn missing_executable_is_reported_lazily() {
        let settings = linux("name: Foo\nversion: '1'\n").unwrap();
        let err = settings.executable().unwrap_err();
        assert_eq!(err.to_string(), "No executable defined for target linux");
    }

    #[test]
    fn osx_requires_identifier_and_existing_icon() {
        let dir = tempfile::tempdir().unwrap();
        let builder = || SettingsBuilder::new(Target::MacOs).source_dir(dir.path());

        let err = builder()
            .parse("name: Foo\nversion: '1'\nosx:\n  icon: app.icns\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing key: osx.identifier");

        let err = builder()
            .parse("name: Foo\nversion: '1'\nosx:\n  icon: app.icns\n  identifier: com.foo\n")
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { what: "Icon file", .. }));

        fs::write(dir.path().join("app.icns"), b"icns").unwrap();
        let settings = builder()
            .parse(
                "name: Foo\nversion: '1'\nexecutable: foo\n\
                 osx:\n  icon: app.icns\n  identifier: com.foo\n",
            )
            .unwrap();
        let macos = settings.macos().unwrap();
        assert_eq!(macos.identifier, "com.foo");
        assert_eq!(macos.custom_info, "");
        assert_eq!(
            settings.executable_destination().unwrap(),
            Path::new("Foo.app/Contents/MacOS/foo")
        );
    }

    #[test]
    fn osx_icon_must_be_a_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("icons")).unwrap();
        let err = SettingsBuilder::new(Target::MacOs)
            .source_dir(dir.path())
            .parse("name: Foo\nversion: '1'\nosx:\n  icon: icons\n  identifier: com.foo\n")
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn windows_requires_icon_and_suffixes_executable() {
        let dir = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new(Target::Windows)
            .source_dir(dir.path())
            .parse("name: Foo\nversion: '1'\nexecutable: foo\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing key: windows.icon");

        fs::write(dir.path().join("app.ico"), b"ico").unwrap();
        let settings = SettingsBuilder::new(Target::Windows)
            .source_dir(dir.path())
            .parse("name: Foo\nversion: '1'\nexecutable: build/foo\nwindows:\n  icon: app.ico\n")
            .unwrap();
        assert_eq!(settings.executable().unwrap(), dir.path().join("build/foo.exe"));
        assert_eq!(
            settings.executable_destination().unwrap(),
            Path::new("Foo/foo.exe")
        );
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new(Target::Linux)
            .load(dir.path().join("bundle.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { what: "Configuration file", .. }));
    }

    #[tokio::test]
    async fn load_resolves_sources_against_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.yaml");
        fs::write(&path, "name: Foo\nversion: '2.1'\nexecutable: build/foo\n").unwrap();
        let settings = SettingsBuilder::new(Target::Linux)
            .source_dir("/work")
            .load(&path)
            .await
            .unwrap();
        assert_eq!(settings.version(), "2.1");
        assert_eq!(settings.executable().unwrap(), Path::new("/work/build/foo"));
    }
}
