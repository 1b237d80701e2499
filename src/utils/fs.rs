//! File system utilities for the custom actions.
//!
//! Provides the recursive tree copy used by the binding relocation action,
//! plus the small overwrite/removal helpers around it.

use crate::bail;
use crate::error::{ErrorExt, Result};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Returns true if anything (file, directory or dangling symlink) sits at `path`.
fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Recursively copies a directory tree into a destination that must not exist yet.
///
/// The destination directory itself is created with a single `create_dir`,
/// so its parent has to exist already. Symlinks inside the source are
/// followed: the copy contains the linked content, not the link.
///
/// Fails if the source path is not a directory or doesn't exist, if the
/// destination already exists, or if the destination lies inside the source.
pub fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        bail!(
            "Source directory {} does not exist or is not a directory.",
            from.display()
        );
    }
    if occupied(to) {
        bail!("Destination directory {} already exists.", to.display());
    }
    if let Ok(source) = from.canonicalize()
        && let Some(parent) = to.parent()
        && let Ok(parent) = parent.canonicalize()
        && parent.starts_with(&source)
    {
        bail!(
            "Destination directory {} is inside source directory {}.",
            to.display(),
            from.display()
        );
    }

    fs::create_dir(to).fs_context("Unable to create destination directory", to)?;
    log::debug!("Copying tree {} -> {}", from.display(), to.display());

    for entry in WalkDir::new(from)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
        }
    }

    Ok(())
}

/// Copies a regular file, replacing whatever is at the destination.
///
/// Parent directories of the destination are created as needed.
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file_overwrite(from: &Path, to: &Path) -> Result<u64> {
    if !from.is_file() {
        bail!("{} does not exist or is not a file", from.display());
    }
    if let Some(dest_dir) = to.parent()
        && !dest_dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dest_dir).fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).fs_context("copying file", from)
}

/// Removes a file or directory tree if one exists at `path`.
///
/// Returns whether anything was removed.
pub fn remove_all(path: &Path) -> Result<bool> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(false);
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).fs_context("removing directory", path)?;
    } else {
        fs::remove_file(path).fs_context("removing file", path)?;
    }
    Ok(true)
}
