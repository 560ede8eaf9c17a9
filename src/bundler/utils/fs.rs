//! File system utilities for bundling.
//!
//! Provides idempotent directory management plus file and directory copies.
//! Copies dereference symlinks so a bundle never points back into the build
//! machine.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
///
/// Returns whether anything was removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::InvalidPath(from.to_path_buf()));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Symlinks are followed: the bundle receives the files they point to.
/// Fails if the source path is not a directory or doesn't exist, or if a
/// link inside it is dangling or loops.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::InvalidPath(from.to_path_buf()));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).follow_links(true) {
            let entry = entry?;
            debug_assert!(entry.path().starts_with(&from));
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .context("directory copy task failed")?
}

/// Marks a copied binary as executable for its owner, group and others.
#[cfg(unix)]
pub async fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .fs_context("setting executable permissions", path)
}

/// Marks a copied binary as executable; a no-op where permissions have no execute bit.
#[cfg(not(unix))]
pub async fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_dir_recreates_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("assets");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("a.txt"), "a").unwrap();
        std::fs::write(src.join("nested/b.txt"), "b").unwrap();

        let dst = dir.path().join("out/assets");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(std::fs::read_to_string(dst.join("nested/b.txt")).unwrap(), "b");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_dir_dereferences_links_leaving_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        let shared = dir.path().join("shared");
        std::fs::create_dir(&shared).unwrap();
        std::fs::write(shared.join("logo.png"), "png").unwrap();
        let src = dir.path().join("assets");
        std::fs::create_dir(&src).unwrap();
        std::os::unix::fs::symlink("../shared/logo.png", src.join("logo.png")).unwrap();
        std::os::unix::fs::symlink("../shared", src.join("linked")).unwrap();

        let dst = dir.path().join("out/data/assets");
        copy_dir(&src, &dst).await.unwrap();

        let logo = dst.join("logo.png");
        assert!(!logo.is_symlink());
        assert_eq!(std::fs::read_to_string(&logo).unwrap(), "png");
        assert!(!dst.join("linked").is_symlink());
        assert_eq!(
            std::fs::read_to_string(dst.join("linked/logo.png")).unwrap(),
            "png"
        );
    }

    #[tokio::test]
    async fn copy_file_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(&dir.path().join("nope"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("bundle");
        create_dir_all(&target.join("inner")).await.unwrap();
        assert!(remove_dir_all(&target).await.unwrap());
        assert!(!remove_dir_all(&target).await.unwrap());
    }
}
