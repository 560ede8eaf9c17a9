//! Writing icon resources into a Windows executable.
//!
//! Patching needs the host's resource-update API, so it sits behind the
//! [`IconPatcher`] trait. ICO parsing happens before a patcher is ever called,
//! which keeps malformed icons from touching the executable on any host.

use super::ico::IconGroup;
use crate::bundler::error::Result;
use std::{path::Path, sync::Arc};

/// Resource name of the group icon Windows shows for the executable.
pub const MAIN_ICON: &str = "MAINICON";

/// Capability to replace an executable's icon resources.
pub trait IconPatcher: std::fmt::Debug + Send + Sync {
    /// Stores every image of `group` as `RT_ICON` and the group directory as
    /// `RT_GROUP_ICON` named [`MAIN_ICON`], as a single atomic update.
    fn patch(&self, executable: &Path, group: &IconGroup) -> Result<()>;
}

/// Patcher for hosts without the Win32 resource-update API.
///
/// Leaves the executable untouched and says so.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedHostPatcher;

impl IconPatcher for UnsupportedHostPatcher {
    fn patch(&self, executable: &Path, group: &IconGroup) -> Result<()> {
        log::warn!(
            "Icon resources can only be written on a Windows host; {} keeps its original icon ({} images not embedded)",
            executable.display(),
            group.len()
        );
        Ok(())
    }
}

/// The patcher appropriate for the host this binary runs on.
pub fn host_patcher() -> Arc<dyn IconPatcher> {
    #[cfg(windows)]
    {
        Arc::new(win32::Win32IconPatcher)
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedHostPatcher)
    }
}

#[cfg(windows)]
pub use win32::Win32IconPatcher;

#[cfg(windows)]
mod win32 {
    use super::{IconGroup, IconPatcher, MAIN_ICON};
    use crate::bundler::error::{Error, Result};
    use std::path::{Path, PathBuf};
    use ::windows::{
        Win32::{
            Foundation::HANDLE,
            System::LibraryLoader::{BeginUpdateResourceW, EndUpdateResourceW, UpdateResourceW},
        },
        core::{HSTRING, PCWSTR},
    };

    const RT_ICON: u16 = 3;
    const RT_GROUP_ICON: u16 = 14;
    // MAKELANGID(LANG_NEUTRAL, SUBLANG_NEUTRAL)
    const LANG_NEUTRAL: u16 = 0;

    /// Equivalent of `MAKEINTRESOURCEW`.
    fn int_resource(id: u16) -> PCWSTR {
        PCWSTR(usize::from(id) as *const u16)
    }

    /// Patches through `BeginUpdateResourceW` / `UpdateResourceW` / `EndUpdateResourceW`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Win32IconPatcher;

    impl IconPatcher for Win32IconPatcher {
        fn patch(&self, executable: &Path, group: &IconGroup) -> Result<()> {
            let update = ResourceUpdate::begin(executable)?;

            for (id, data) in group.icons() {
                update.put(int_resource(RT_ICON), int_resource(id), data)?;
            }

            let name = HSTRING::from(MAIN_ICON);
            update.put(
                int_resource(RT_GROUP_ICON),
                PCWSTR(name.as_ptr()),
                &group.to_grpicon(),
            )?;

            update.commit()
        }
    }

    /// Open resource-update transaction.
    ///
    /// Discarded on drop unless [`ResourceUpdate::commit`] ran.
    struct ResourceUpdate {
        handle: HANDLE,
        path: PathBuf,
        finished: bool,
    }

    impl ResourceUpdate {
        fn begin(path: &Path) -> Result<Self> {
            let wide = HSTRING::from(path.as_os_str());
            let handle = unsafe { BeginUpdateResourceW(&wide, false) }
                .map_err(|e| transaction_error(path, "opening resource update", e))?;
            Ok(Self {
                handle,
                path: path.to_path_buf(),
                finished: false,
            })
        }

        fn put(&self, kind: PCWSTR, name: PCWSTR, data: &[u8]) -> Result<()> {
            let len = u32::try_from(data.len()).map_err(|_| Error::ResourceTransaction {
                path: self.path.clone(),
                reason: format!("resource of {} bytes is too large", data.len()),
            })?;
            unsafe {
                UpdateResourceW(
                    self.handle,
                    kind,
                    name,
                    LANG_NEUTRAL,
                    Some(data.as_ptr().cast()),
                    len,
                )
            }
            .map_err(|e| transaction_error(&self.path, "updating resource", e))
        }

        fn commit(mut self) -> Result<()> {
            self.finished = true;
            unsafe { EndUpdateResourceW(self.handle, false) }
                .map_err(|e| transaction_error(&self.path, "committing resource update", e))
        }
    }

    impl Drop for ResourceUpdate {
        fn drop(&mut self) {
            if !self.finished
                && let Err(e) = unsafe { EndUpdateResourceW(self.handle, true) }
            {
                log::warn!(
                    "Discarding resource update for {} failed: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }

    fn transaction_error(path: &Path, action: &str, error: ::windows::core::Error) -> Error {
        Error::ResourceTransaction {
            path: path.to_path_buf(),
            reason: format!("{action}: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::platform::windows::ico::{IconFile, tests::sample_ico};

    #[test]
    fn unsupported_host_patcher_leaves_executable_alone() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("foo.exe");
        std::fs::write(&exe, b"MZ").unwrap();

        let file = IconFile::parse(Path::new("app.ico"), &sample_ico()).unwrap();
        UnsupportedHostPatcher
            .patch(&exe, &IconGroup::new(file))
            .unwrap();

        assert_eq!(std::fs::read(&exe).unwrap(), b"MZ");
    }
}
