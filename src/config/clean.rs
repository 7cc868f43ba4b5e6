//! Options for the size-threshold cleaner.

/// How failures while removing a directory tree are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Attempt every entry and skip the ones that cannot be removed.
    ///
    /// The directory may be left partially removed.
    #[default]
    IgnoreErrors,

    /// Stop removing a directory at the first failure and report it.
    Strict,
}

impl DeletionPolicy {
    /// Create a deletion policy from the `ignore_file_errors` flag.
    #[must_use]
    pub const fn from_ignore_file_errors(ignore_file_errors: bool) -> Self {
        if ignore_file_errors {
            Self::IgnoreErrors
        } else {
            Self::Strict
        }
    }
}

/// Configuration for a cleaner run.
#[derive(Clone, Debug)]
pub struct CleanOptions {
    /// Subdirectories strictly smaller than this many bytes are removed.
    ///
    /// Zero or negative values select nothing.
    pub threshold: i64,

    /// Only report what would be deleted
    pub dry_run: bool,

    /// Failure handling during removal
    pub policy: DeletionPolicy,
}

impl CleanOptions {
    /// Whether a directory of `size` bytes falls below the threshold.
    #[must_use]
    pub fn is_below_threshold(&self, size: u64) -> bool {
        i128::from(size) < i128::from(self.threshold)
    }
}
