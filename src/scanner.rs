//! Immediate-subdirectory listing and measuring.
//!
//! Both tools work on the direct children of one directory. This module lists
//! those children in a stable order and, for the cleaner, measures each of
//! them with a full recursive walk.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::utils::calculate_dir_size;

/// A directory together with its measured size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizedDir {
    /// Path of the directory
    pub path: PathBuf,

    /// Total size of all files below the directory, in bytes
    pub size: u64,
}

/// List the immediate subdirectories of `root`, sorted by file name.
///
/// Symlinks pointing at directories count as subdirectories. Entries that
/// cannot be inspected are skipped.
///
/// # Errors
///
/// Returns the I/O error from reading `root` itself (missing directory,
/// not a directory, permission denied).
pub fn list_subdirectories(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {e}", root.display());
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

impl SizedDir {
    /// Measure `path` with a full recursive walk.
    ///
    /// The directory is re-checked right before it is walked; `None` means it
    /// disappeared since it was listed.
    #[must_use]
    pub fn measure(path: PathBuf) -> Option<Self> {
        if !path.is_dir() {
            log::debug!("{} vanished before it could be measured", path.display());
            return None;
        }

        let size = calculate_dir_size(&path);
        log::trace!("{} -> {size} bytes", path.display());
        Some(Self { path, size })
    }
}
