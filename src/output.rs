//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete output of a cleaner or relocator run. When the `--json` flag is
//! passed, these structures are serialized to stdout as a single JSON object,
//! replacing all human-readable output.

use std::path::Path;

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::{
    cleaner::CleanResult,
    relocator::{PlannedMove, RelocateResult},
};

/// Execution mode recorded in the JSON output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonMode {
    /// Nothing was changed on disk.
    DryRun,

    /// Directories were deleted or moved.
    Execute,
}

impl JsonMode {
    const fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Execute
        }
    }
}

/// Top-level JSON output of `clean-small-dirs --json`.
#[derive(Debug, Serialize)]
pub struct JsonCleanOutput {
    /// `"dry_run"` or `"execute"`.
    pub mode: JsonMode,

    /// Directory whose subdirectories were examined.
    pub base_dir: String,

    /// Threshold in bytes; directories strictly below it were selected.
    pub threshold: i64,

    /// Directories deleted (or that would be deleted).
    pub directories: Vec<JsonDirEntry>,

    /// Aggregated numbers.
    pub summary: JsonCleanSummary,

    /// Directories that were selected but are still on disk after removal.
    pub leftover: Vec<String>,

    /// Error messages for directories that could not be deleted.
    pub errors: Vec<String>,
}

/// A single selected directory.
#[derive(Debug, Serialize)]
pub struct JsonDirEntry {
    /// Absolute path of the directory.
    pub path: String,

    /// Total size in bytes.
    pub size: u64,

    /// Size as printed in report lines (e.g. `"12.50 MB"`).
    pub size_formatted: String,
}

/// Totals for a cleaner run.
#[derive(Debug, Serialize)]
pub struct JsonCleanSummary {
    /// Number of selected directories.
    pub count: usize,

    /// Sum of their sizes in bytes.
    pub total_size: u64,

    /// Human-readable total (e.g. `"1.5 GiB"`).
    pub total_size_formatted: String,
}

/// Top-level JSON output of `move-large-videos --json`.
#[derive(Debug, Serialize)]
pub struct JsonRelocateOutput {
    /// `"dry_run"` or `"execute"`.
    pub mode: JsonMode,

    /// Directory whose subdirectories were examined.
    pub source_dir: String,

    /// Directory receiving the moved subdirectories.
    pub target_dir: String,

    /// Moves performed (or planned) before the run ended.
    pub moves: Vec<JsonMoveEntry>,

    /// The error that stopped the run, or `null`.
    pub error: Option<String>,
}

/// A single relocation.
#[derive(Debug, Serialize)]
pub struct JsonMoveEntry {
    /// Path the subdirectory was moved from.
    pub source: String,

    /// Path the subdirectory was moved to.
    pub destination: String,

    /// Video file that qualified the subdirectory.
    pub video: String,

    /// Size of that video in bytes.
    pub video_size: u64,
}

impl JsonCleanOutput {
    /// Build the JSON document for a finished cleaner run.
    #[must_use]
    pub fn from_result(base_dir: &Path, threshold: i64, result: &CleanResult) -> Self {
        Self {
            mode: JsonMode::from_dry_run(result.dry_run),
            base_dir: base_dir.display().to_string(),
            threshold,
            directories: result
                .removed
                .iter()
                .map(|dir| JsonDirEntry {
                    path: dir.path.display().to_string(),
                    size: dir.size,
                    size_formatted: crate::utils::format_mib(dir.size),
                })
                .collect(),
            summary: JsonCleanSummary {
                count: result.removed.len(),
                total_size: result.total_size,
                total_size_formatted: format_size(result.total_size, BINARY),
            },
            leftover: result
                .leftover
                .iter()
                .map(|dir| dir.path.display().to_string())
                .collect(),
            errors: result.errors.clone(),
        }
    }
}

impl JsonRelocateOutput {
    /// Build the JSON document for a finished relocator run.
    #[must_use]
    pub fn from_result(source_dir: &Path, target_dir: &Path, result: &RelocateResult) -> Self {
        Self {
            mode: JsonMode::from_dry_run(result.dry_run),
            source_dir: source_dir.display().to_string(),
            target_dir: target_dir.display().to_string(),
            moves: result.moves.iter().map(JsonMoveEntry::from_move).collect(),
            error: result.error.as_ref().map(ToString::to_string),
        }
    }
}

impl JsonMoveEntry {
    /// Convert a [`PlannedMove`] into a `JsonMoveEntry`.
    #[must_use]
    pub fn from_move(planned: &PlannedMove) -> Self {
        Self {
            source: planned.source.display().to_string(),
            destination: planned.destination.display().to_string(),
            video: planned.video.path.display().to_string(),
            video_size: planned.video.size,
        }
    }
}
