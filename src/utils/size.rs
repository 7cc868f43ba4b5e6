//! Size parsing, measuring and formatting utilities.
//!
//! This module provides functions for parsing human-readable size strings
//! (like "500M" or "1.5G") into byte values, for measuring directory sizes
//! on disk, and for rendering byte counts in the `MB` form used by the
//! cleaner's report lines.

use std::{fs, path::Path};

use anyhow::{Result, anyhow, bail};
use walkdir::WalkDir;

/// Binary unit suffixes accepted by [`parse_size`] and their multipliers.
const UNITS: &[(char, f64)] = &[
    ('K', 1_024.0),
    ('M', 1_048_576.0),
    ('G', 1_073_741_824.0),
];

/// Number of bytes in one mebibyte, used by [`format_mib`].
const MIB: f64 = 1_048_576.0;

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Recursively traverses the directory tree using `walkdir` and sums the sizes
/// of every non-directory entry found. Sizes are taken from `fs::metadata`, so
/// a symlink to a file counts with the size of its target, while symlinked
/// directories are not descended into.
///
/// Entries that vanish between listing and `stat`, broken symlinks and
/// unreadable subtrees contribute nothing, so the function always returns a
/// result. A concurrently mutated tree is measured on a best-effort basis.
///
/// Returns `0` if the path does not exist or cannot be traversed at the root level.
#[must_use]
pub fn calculate_dir_size(path: &Path) -> u64 {
    let mut total = 0u64;

    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry under {}: {e}", path.display());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => total += metadata.len(),
            Ok(_) => {}
            Err(e) => log::debug!("Skipping {}: {e}", entry.path().display()),
        }
    }

    total
}

/// Parse a human-readable size string into a signed byte count.
///
/// Surrounding whitespace is ignored and the string is matched
/// case-insensitively. A trailing `K`, `M` or `G` selects a binary multiplier
/// (1024, 1024², 1024³) and allows a decimal number in front of it; the
/// product is truncated toward zero. Without a suffix the whole string must be
/// an integer number of bytes.
///
/// Negative values are accepted and produce a negative threshold.
///
/// # Errors
///
/// This function will return an error if:
/// - The string is empty
/// - The numeric part is not a valid number (e.g. "abc", "1.5" without a unit)
/// - The number is not finite (e.g. "infG")
/// - The resulting byte count does not fit into an `i64`
///
/// # Examples
///
/// ```
/// # use dir_sweep::utils::parse_size;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// assert_eq!(parse_size("1G")?, 1_073_741_824);
/// assert_eq!(parse_size("500m")?, 524_288_000);
/// assert_eq!(parse_size("1024")?, 1_024);
/// # Ok(())
/// # }
/// ```
pub fn parse_size(size_str: &str) -> Result<i64> {
    let size_str = size_str.trim().to_uppercase();

    let Some(last) = size_str.chars().last() else {
        bail!("Invalid size: empty string");
    };

    match UNITS.iter().find(|(suffix, _)| *suffix == last) {
        Some((_, multiplier)) => {
            let number_str = &size_str[..size_str.len() - last.len_utf8()];
            parse_scaled_size(number_str, *multiplier)
        }
        None => size_str
            .parse::<i64>()
            .map_err(|e| anyhow!("Invalid size '{size_str}': {e}")),
    }
}

/// Parse the numeric part of a suffixed size and apply the unit multiplier.
#[allow(clippy::cast_possible_truncation)]
fn parse_scaled_size(number_str: &str, multiplier: f64) -> Result<i64> {
    let number: f64 = number_str
        .trim()
        .parse()
        .map_err(|e| anyhow!("Invalid size number '{number_str}': {e}"))?;

    if !number.is_finite() {
        bail!("Invalid size number '{number_str}': not a finite value");
    }

    let bytes = (number * multiplier).trunc();

    // i64::MAX is not exactly representable as f64; the nearest value is 2^63.
    if bytes >= 9_223_372_036_854_775_808.0 || bytes < -9_223_372_036_854_775_808.0 {
        bail!("Size value overflow: {number_str} * {multiplier}");
    }

    Ok(bytes as i64)
}

/// Format a byte count in mebibytes with two decimals, e.g. `"12.50 MB"`.
///
/// The unit never scales up, so a 3 GiB directory is shown as `"3072.00 MB"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}
