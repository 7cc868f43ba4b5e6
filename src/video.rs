//! Large video detection.
//!
//! A directory qualifies for relocation when one of its direct files looks
//! like a video (by name) and is larger than the configured size. Only the
//! first match is needed, so scanning stops there.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::config::RelocateOptions;

/// A video file that exceeded the size limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFile {
    /// Path of the video file
    pub path: PathBuf,

    /// Size of the file in bytes
    pub size: u64,
}

/// Find the first large video among the direct files of `dir`.
///
/// Entries are examined in file-name order, so the reported file is the same
/// on every run regardless of how the filesystem lists them. Subdirectories
/// are not searched. Symlinks are followed; a file that cannot be inspected is
/// skipped.
///
/// A file qualifies when its lowercased name ends with one of
/// `options.video_extensions` and its size is strictly greater than
/// `options.min_video_size`.
///
/// # Errors
///
/// Returns the I/O error from reading `dir` itself.
pub fn find_large_video(dir: &Path, options: &RelocateOptions) -> io::Result<Option<VideoFile>> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name();
        if !options.is_video_name(&name.to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::debug!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        if metadata.is_file() && metadata.len() > options.min_video_size {
            log::debug!(
                "{} holds large video {} ({} bytes)",
                dir.display(),
                path.display(),
                metadata.len()
            );
            return Ok(Some(VideoFile {
                path,
                size: metadata.len(),
            }));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    const DEFAULT_GIB: u64 = crate::config::DEFAULT_MIN_VIDEO_SIZE;

    fn options(min_video_size: u64) -> RelocateOptions {
        RelocateOptions {
            min_video_size,
            ..RelocateOptions::default()
        }
    }

    fn create_sized(path: &Path, len: u64) {
        File::create(path).unwrap().set_len(len).unwrap();
    }

    #[test]
    fn test_finds_large_video() {
        let tmp = TempDir::new().unwrap();
        create_sized(&tmp.path().join("movie.mkv"), 101);

        let found = find_large_video(tmp.path(), &options(100)).unwrap();
        assert_eq!(
            found,
            Some(VideoFile {
                path: tmp.path().join("movie.mkv"),
                size: 101,
            })
        );
    }

    #[test]
    fn test_exact_threshold_does_not_qualify() {
        let tmp = TempDir::new().unwrap();
        create_sized(&tmp.path().join("movie.mp4"), 100);

        assert_eq!(find_large_video(tmp.path(), &options(100)).unwrap(), None);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        create_sized(&tmp.path().join("MOVIE.MP4"), 500);

        assert!(find_large_video(tmp.path(), &options(100)).unwrap().is_some());
    }

    #[test]
    fn test_large_non_video_ignored() {
        let tmp = TempDir::new().unwrap();
        create_sized(&tmp.path().join("disk.iso"), 10_000);
        create_sized(&tmp.path().join("movie.mp4.part"), 10_000);

        assert_eq!(find_large_video(tmp.path(), &options(100)).unwrap(), None);
    }

    #[test]
    fn test_nested_videos_not_searched() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("extras")).unwrap();
        create_sized(&tmp.path().join("extras/behind.mp4"), 10_000);

        assert_eq!(find_large_video(tmp.path(), &options(100)).unwrap(), None);
    }

    #[test]
    fn test_directory_named_like_video_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("season.mkv")).unwrap();
        create_sized(&tmp.path().join("season.mkv/ep1.mkv"), 10_000);

        assert_eq!(find_large_video(tmp.path(), &options(100)).unwrap(), None);
    }

    #[test]
    fn test_first_match_in_name_order() {
        let tmp = TempDir::new().unwrap();
        create_sized(&tmp.path().join("b.avi"), 300);
        create_sized(&tmp.path().join("a.mov"), 200);
        create_sized(&tmp.path().join("c.flv"), 400);

        let found = find_large_video(tmp.path(), &options(100)).unwrap().unwrap();
        assert_eq!(found.path, tmp.path().join("a.mov"));
    }

    #[test]
    fn test_real_gigabyte_threshold() {
        let tmp = TempDir::new().unwrap();
        create_sized(&tmp.path().join("exact.mp4"), DEFAULT_GIB);
        assert_eq!(
            find_large_video(tmp.path(), &RelocateOptions::default()).unwrap(),
            None
        );

        create_sized(&tmp.path().join("over.mp4"), DEFAULT_GIB + 1);
        let found = find_large_video(tmp.path(), &RelocateOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(found.path, tmp.path().join("over.mp4"));
    }

    #[test]
    fn test_missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(find_large_video(&tmp.path().join("nope"), &options(1)).is_err());
    }
}
