//! Size-threshold cleanup.
//!
//! This module walks the immediate subdirectories of a base directory,
//! measures each one, and removes (or, in dry-run mode, reports) every
//! directory whose total size is below the configured threshold.

use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;
use humansize::{BINARY, format_size};
use walkdir::WalkDir;

use crate::{
    config::{CleanOptions, DeletionPolicy},
    scanner::{SizedDir, list_subdirectories},
    utils::format_mib,
};

/// Structured result returned after a cleanup run.
///
/// Contains all the data needed to render either human-readable or JSON output.
#[derive(Debug)]
pub struct CleanResult {
    /// Whether the run only reported its selection.
    pub dry_run: bool,

    /// Directories that were removed, or would have been in dry-run mode.
    pub removed: Vec<SizedDir>,

    /// Directories selected for removal that are still present afterwards.
    ///
    /// Best-effort removal leaves a directory here when some of its entries
    /// could not be deleted, or when it is a symbolic link.
    pub leftover: Vec<SizedDir>,

    /// Sum of the sizes in `removed`.
    pub total_size: u64,

    /// Error messages for directories that could not be removed.
    ///
    /// Only [`DeletionPolicy::Strict`] produces entries here.
    pub errors: Vec<String>,
}

/// Removes subdirectories that fall below a size threshold.
#[derive(Debug)]
pub struct Cleaner {
    options: CleanOptions,

    /// When `true`, no report lines are printed (used by `--json` mode).
    quiet: bool,
}

impl Cleaner {
    /// Create a new cleaner with the given options.
    #[must_use]
    pub const fn new(options: CleanOptions) -> Self {
        Self {
            options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses the per-directory lines).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Clean the immediate subdirectories of `base`.
    ///
    /// Subdirectories are handled one at a time in file-name order: each is
    /// measured with a full recursive walk and, when strictly smaller than
    /// the threshold, a line is printed and the directory is removed
    /// according to the configured [`DeletionPolicy`]. Directories that
    /// disappear before they are measured are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` cannot be listed. Failures while removing
    /// individual directories never abort the run; under
    /// [`DeletionPolicy::Strict`] they are collected in
    /// [`CleanResult::errors`]; otherwise a directory still present after
    /// removal is recorded in [`CleanResult::leftover`].
    pub fn clean(&self, base: &Path) -> Result<CleanResult> {
        let candidates = list_subdirectories(base)
            .with_context(|| format!("Failed to list {}", base.display()))?;

        let mut result = CleanResult {
            dry_run: self.options.dry_run,
            removed: Vec::new(),
            leftover: Vec::new(),
            total_size: 0,
            errors: Vec::new(),
        };

        for dir in candidates.into_iter().filter_map(SizedDir::measure) {
            if !self.options.is_below_threshold(dir.size) {
                log::debug!(
                    "Keeping {} ({} bytes is not below {})",
                    dir.path.display(),
                    dir.size,
                    self.options.threshold
                );
                continue;
            }

            if !self.quiet {
                println!("{}", report_line(&dir, self.options.dry_run));
            }

            if !self.options.dry_run {
                log::info!("Removing {}", dir.path.display());
                if let Err(e) = remove_tree(&dir.path, self.options.policy) {
                    result
                        .errors
                        .push(format!("Failed to delete {}: {e}", dir.path.display()));
                    continue;
                }

                if fs::symlink_metadata(&dir.path).is_ok() {
                    log::warn!("{} was only partly removed", dir.path.display());
                    result.leftover.push(dir);
                    continue;
                }
            }

            result.total_size += dir.size;
            result.removed.push(dir);
        }

        Ok(result)
    }

    /// Print a human-readable cleanup summary to stdout.
    ///
    /// This is called from `main` when `--json` is **not** active.
    pub fn print_summary(result: &CleanResult) {
        if !result.errors.is_empty() {
            println!("\n{}", "⚠️  Some directories could not be deleted:".yellow());
            for error in &result.errors {
                eprintln!("  {}", error.red());
            }
        }

        if !result.leftover.is_empty() {
            println!(
                "\n{}",
                format!(
                    "⚠️  {} directories could not be fully removed:",
                    result.leftover.len()
                )
                .yellow()
            );
            for dir in &result.leftover {
                println!("  {}", dir.path.display());
            }
        }

        if result.removed.is_empty() {
            if result.errors.is_empty() && result.leftover.is_empty() {
                println!("{}", "✨ No directories below the size threshold".green());
            }
            return;
        }

        let size = format_size(result.total_size, BINARY);
        if result.dry_run {
            println!(
                "\n{} {}",
                "🧪 Dry run complete!".yellow(),
                format!(
                    "Would delete {} directories ({size})",
                    result.removed.len()
                )
                .bright_white()
            );
        } else {
            println!(
                "\n{} {}",
                "🧹 Cleanup complete!".green(),
                format!("Deleted {} directories ({size})", result.removed.len()).bright_white()
            );
        }
    }
}

/// Render the report line for a selected directory.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use dir_sweep::{cleaner::report_line, scanner::SizedDir};
/// let dir = SizedDir { path: PathBuf::from("/data/old"), size: 1_572_864 };
/// assert_eq!(
///     report_line(&dir, true),
///     "[DRY-RUN] Would delete: /data/old (size: 1.50 MB)"
/// );
/// ```
#[must_use]
pub fn report_line(dir: &SizedDir, dry_run: bool) -> String {
    let size = format_mib(dir.size);
    if dry_run {
        format!("[DRY-RUN] Would delete: {} (size: {size})", dir.path.display())
    } else {
        format!("Deleting: {} (size: {size})", dir.path.display())
    }
}

/// Remove the directory tree at `path` following `policy`.
///
/// A symbolic link is never followed or removed: `IgnoreErrors` leaves it in
/// place silently, `Strict` reports it.
///
/// # Errors
///
/// With [`DeletionPolicy::Strict`], returns the first I/O error encountered.
/// With [`DeletionPolicy::IgnoreErrors`] this function never fails; entries
/// that cannot be removed are logged at debug level and left behind.
pub fn remove_tree(path: &Path, policy: DeletionPolicy) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if policy == DeletionPolicy::IgnoreErrors => {
            log::debug!("Cannot stat {}: {e}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if metadata.file_type().is_symlink() {
        if policy == DeletionPolicy::Strict {
            return Err(io::Error::other(format!(
                "refusing to remove symbolic link {}",
                path.display()
            )));
        }
        log::debug!("Not removing symbolic link {}", path.display());
        return Ok(());
    }

    match policy {
        DeletionPolicy::Strict => fs::remove_dir_all(path),
        DeletionPolicy::IgnoreErrors => {
            remove_tree_best_effort(path);
            Ok(())
        }
    }
}

/// Delete everything below and including `path`, children first, skipping
/// whatever cannot be removed.
fn remove_tree_best_effort(path: &Path) {
    for entry in WalkDir::new(path).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Ignoring walk error under {}: {e}", path.display());
                continue;
            }
        };

        let removal = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };

        if let Err(e) = removal {
            log::debug!("Ignoring failure to remove {}: {e}", entry.path().display());
        }
    }
}
