//! Options for the large-video relocator.

/// Size a video file must exceed to mark its directory for relocation (1 GiB).
pub const DEFAULT_MIN_VIDEO_SIZE: u64 = 1_073_741_824;

/// File name endings recognised as video files.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".avi", ".mov", ".mkv", ".flv", ".wmv", ".mpg", ".mpeg", ".3gp", ".rmvb", ".vob",
];

/// Configuration for a relocator run.
#[derive(Clone, Debug)]
pub struct RelocateOptions {
    /// Only report what would be moved
    pub dry_run: bool,

    /// A video must be strictly larger than this many bytes
    pub min_video_size: u64,

    /// Lowercase file name endings, each starting with a `.`
    pub video_extensions: Vec<String>,
}

impl Default for RelocateOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            min_video_size: DEFAULT_MIN_VIDEO_SIZE,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl RelocateOptions {
    /// Replace the extension list, normalizing each entry.
    ///
    /// Entries are trimmed and lowercased, and a leading `.` is added when
    /// missing so that `"mp4"` does not match a file called `bitmp4`.
    /// Blank entries are dropped.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.video_extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    /// Whether a file name ends with one of the configured extensions.
    #[must_use]
    pub fn is_video_name(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.video_extensions
            .iter()
            .any(|ext| lower.ends_with(ext.as_str()))
    }
}

fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{ext}"))
    }
}
