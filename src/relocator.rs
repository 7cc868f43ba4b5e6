//! Relocation of directories that hold large videos.
//!
//! The relocator looks at each immediate subdirectory of a source directory,
//! checks its direct files for a large video, and moves every qualifying
//! subdirectory into a target directory under the same name. The first error
//! ends the run; moves that already happened stay in place.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    config::RelocateOptions,
    error::RelocateError,
    scanner::list_subdirectories,
    video::{VideoFile, find_large_video},
};

/// A subdirectory selected for relocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    /// Current location of the subdirectory
    pub source: PathBuf,

    /// Location inside the target directory
    pub destination: PathBuf,

    /// The video that qualified the subdirectory
    pub video: VideoFile,
}

impl PlannedMove {
    /// Render the report line for this move.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::PathBuf;
    /// # use dir_sweep::{relocator::PlannedMove, video::VideoFile};
    /// let planned = PlannedMove {
    ///     source: PathBuf::from("/in/show"),
    ///     destination: PathBuf::from("/out/show"),
    ///     video: VideoFile { path: PathBuf::from("/in/show/ep.mkv"), size: 2 },
    /// };
    /// assert_eq!(planned.report_line(false), "Moving: /in/show -> /out/show");
    /// ```
    #[must_use]
    pub fn report_line(&self, dry_run: bool) -> String {
        if dry_run {
            format!(
                "[DRY-RUN] Would move: {} -> {}",
                self.source.display(),
                self.destination.display()
            )
        } else {
            format!(
                "Moving: {} -> {}",
                self.source.display(),
                self.destination.display()
            )
        }
    }
}

/// Outcome of a relocation run.
#[derive(Debug)]
pub struct RelocateResult {
    /// Whether the run only reported its selection.
    pub dry_run: bool,

    /// Moves performed (or, in dry-run mode, planned) before the run ended.
    pub moves: Vec<PlannedMove>,

    /// The error that stopped the run, if any.
    pub error: Option<RelocateError>,
}

impl RelocateResult {
    /// Whether the run went through every subdirectory without an error.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Moves subdirectories containing large videos into a target directory.
#[derive(Debug)]
pub struct Relocator {
    options: RelocateOptions,

    /// When `true`, no report lines are printed (used by `--json` mode).
    quiet: bool,
}

impl Relocator {
    /// Create a new relocator with the given options.
    #[must_use]
    pub const fn new(options: RelocateOptions) -> Self {
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

    /// Relocate qualifying subdirectories of `source` into `target`.
    ///
    /// Subdirectories are visited in file-name order. For each one holding a
    /// large video, a line is printed and, unless in dry-run mode, the
    /// subdirectory is moved to `target/<name>`. The run stops at the first
    /// error, which is returned in [`RelocateResult::error`] next to the
    /// moves completed so far. There is no rollback.
    ///
    /// In dry-run mode the target directory is never inspected.
    #[must_use]
    pub fn relocate(&self, source: &Path, target: &Path) -> RelocateResult {
        let mut moves = Vec::new();
        let error = self.run(source, target, &mut moves).err();

        if let Some(e) = &error {
            log::debug!("Relocation stopped after {} move(s): {e}", moves.len());
        }

        RelocateResult {
            dry_run: self.options.dry_run,
            moves,
            error,
        }
    }

    fn run(
        &self,
        source: &Path,
        target: &Path,
        moves: &mut Vec<PlannedMove>,
    ) -> Result<(), RelocateError> {
        if !source.is_dir() {
            return Err(RelocateError::DirectoryNotFound(source.to_path_buf()));
        }

        let subdirs = list_subdirectories(source)
            .map_err(|e| RelocateError::from_io("list", source.to_path_buf(), e))?;

        for subdir in subdirs {
            let Some(video) = self.scan(&subdir)? else {
                continue;
            };
            let Some(name) = subdir.file_name() else {
                continue;
            };

            let planned = PlannedMove {
                destination: target.join(name),
                source: subdir,
                video,
            };

            if !self.quiet {
                println!("{}", planned.report_line(self.options.dry_run));
            }

            if !self.options.dry_run {
                move_dir(&planned.source, &planned.destination, target)?;
                log::info!(
                    "Moved {} to {}",
                    planned.source.display(),
                    planned.destination.display()
                );
            }

            moves.push(planned);
        }

        Ok(())
    }

    /// Look for a large video in `subdir`, tolerating its disappearance.
    fn scan(&self, subdir: &Path) -> Result<Option<VideoFile>, RelocateError> {
        match find_large_video(subdir, &self.options) {
            Ok(found) => Ok(found),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} vanished before it could be scanned", subdir.display());
                Ok(None)
            }
            Err(e) => Err(RelocateError::from_io("scan", subdir.to_path_buf(), e)),
        }
    }
}

/// Move `source` to `destination` inside `target`.
///
/// A rename is tried first. When `target` lives on another filesystem the
/// tree is copied over and the source removed afterwards, so that case is
/// not atomic.
fn move_dir(source: &Path, destination: &Path, target: &Path) -> Result<(), RelocateError> {
    if !target.is_dir() {
        return Err(RelocateError::DirectoryNotFound(target.to_path_buf()));
    }

    if fs::symlink_metadata(destination).is_ok() {
        return Err(RelocateError::DestinationExists(destination.to_path_buf()));
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{} is on another filesystem, copying {}",
                target.display(),
                source.display()
            );
            copy_then_remove(source, destination)
        }
        Err(e) => Err(RelocateError::from_io("move", source.to_path_buf(), e)),
    }
}

/// Copy the tree at `source` to `destination`, then delete `source`.
///
/// A failed copy removes the partial destination and leaves `source` intact.
fn copy_then_remove(source: &Path, destination: &Path) -> Result<(), RelocateError> {
    if let Err(e) = copy_tree(source, destination) {
        if let Err(cleanup) = fs::remove_dir_all(destination) {
            log::debug!("Could not clean up {}: {cleanup}", destination.display());
        }
        return Err(RelocateError::Io {
            action: "copy",
            path: source.to_path_buf(),
            source: e,
        });
    }

    fs::remove_dir_all(source).map_err(|e| RelocateError::Io {
        action: "remove",
        path: source.to_path_buf(),
        source: e,
    })
}

/// Recreate the tree at `source` under `destination`.
///
/// Symbolic links inside the tree are copied as links, not followed.
fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let to = destination.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir(&to)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &to)?;
        } else {
            fs::copy(entry.path(), &to)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn relocator(dry_run: bool) -> Relocator {
        Relocator::new(RelocateOptions {
            dry_run,
            min_video_size: 100,
            ..RelocateOptions::default()
        })
        .with_quiet(true)
    }

    fn create_sized(path: &Path, len: u64) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap().set_len(len).unwrap();
    }

    /// Source with one qualifying and one non-qualifying subdirectory.
    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("incoming");
        let target = tmp.path().join("archive");
        create_sized(&source.join("big-show/ep1.mkv"), 500);
        create_sized(&source.join("small-show/ep1.mkv"), 50);
        fs::create_dir_all(&target).unwrap();
        (tmp, source, target)
    }

    #[test]
    fn test_report_line_dry_run() {
        let planned = PlannedMove {
            source: PathBuf::from("/a/b"),
            destination: PathBuf::from("/c/b"),
            video: VideoFile {
                path: PathBuf::from("/a/b/x.mp4"),
                size: 1,
            },
        };
        assert_eq!(planned.report_line(true), "[DRY-RUN] Would move: /a/b -> /c/b");
    }

    #[test]
    fn test_moves_only_qualifying_directories() {
        let (_tmp, source, target) = setup();

        let result = relocator(false).relocate(&source, &target);

        assert!(result.is_success());
        assert_eq!(result.moves.len(), 1);
        assert_eq!(result.moves[0].source, source.join("big-show"));
        assert_eq!(result.moves[0].destination, target.join("big-show"));
        assert_eq!(result.moves[0].video.size, 500);
        assert!(target.join("big-show/ep1.mkv").exists());
        assert!(!source.join("big-show").exists());
        assert!(source.join("small-show").exists());
    }

    #[test]
    fn test_dry_run_moves_nothing() {
        let (_tmp, source, target) = setup();

        let result = relocator(true).relocate(&source, &target);

        assert!(result.is_success());
        assert!(result.dry_run);
        assert_eq!(result.moves.len(), 1);
        assert!(source.join("big-show").exists());
        assert!(!target.join("big-show").exists());
    }

    #[test]
    fn test_missing_source_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("missing");

        let result = relocator(false).relocate(&source, tmp.path());

        assert!(result.moves.is_empty());
        assert!(matches!(
            result.error,
            Some(RelocateError::DirectoryNotFound(ref p)) if *p == source
        ));
    }

    #[test]
    fn test_missing_target_stops_run() {
        let (tmp, source, _target) = setup();
        let missing = tmp.path().join("no-such-target");

        let result = relocator(false).relocate(&source, &missing);

        assert!(result.moves.is_empty());
        assert!(matches!(
            result.error,
            Some(RelocateError::DirectoryNotFound(ref p)) if *p == missing
        ));
        assert!(source.join("big-show").exists());
    }

    #[test]
    fn test_dry_run_does_not_check_target() {
        let (tmp, source, _target) = setup();

        let result = relocator(true).relocate(&source, &tmp.path().join("later"));

        assert!(result.is_success());
        assert_eq!(result.moves.len(), 1);
    }

    #[test]
    fn test_existing_destination_stops_run_and_keeps_earlier_moves() {
        let (_tmp, source, target) = setup();
        create_sized(&source.join("another/film.mp4"), 900);
        fs::create_dir_all(target.join("big-show")).unwrap();

        let result = relocator(false).relocate(&source, &target);

        // "another" sorts before "big-show" and is moved first.
        assert_eq!(result.moves.len(), 1);
        assert_eq!(result.moves[0].source, source.join("another"));
        assert!(target.join("another/film.mp4").exists());
        assert!(matches!(
            result.error,
            Some(RelocateError::DestinationExists(ref p)) if *p == target.join("big-show")
        ));
        assert!(source.join("big-show/ep1.mkv").exists());
    }

    #[test]
    fn test_source_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        create_sized(&file, 1);

        let result = relocator(false).relocate(&file, tmp.path());

        assert!(result.moves.is_empty());
        assert!(matches!(
            result.error,
            Some(RelocateError::DirectoryNotFound(ref p)) if *p == file
        ));
    }

    #[test]
    fn test_loose_videos_in_source_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("src");
        let target = tmp.path().join("dst");
        create_sized(&source.join("loose.mp4"), 10_000);
        fs::create_dir_all(&target).unwrap();

        let result = relocator(false).relocate(&source, &target);

        assert!(result.is_success());
        assert!(result.moves.is_empty());
        assert!(source.join("loose.mp4").exists());
    }

    #[test]
    fn test_copy_then_remove_moves_whole_tree() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("show");
        let destination = tmp.path().join("moved");
        create_sized(&source.join("ep1.mkv"), 200);
        create_sized(&source.join("extras/notes.txt"), 5);
        fs::create_dir_all(source.join("empty")).unwrap();

        copy_then_remove(&source, &destination).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::metadata(destination.join("ep1.mkv")).unwrap().len(), 200);
        assert!(destination.join("extras/notes.txt").is_file());
        assert!(destination.join("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_keeps_symlinks_as_links() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        create_sized(&outside.join("big.bin"), 10);
        let source = tmp.path().join("show");
        create_sized(&source.join("ep1.mkv"), 1);
        symlink(&outside, source.join("link")).unwrap();
        let destination = tmp.path().join("copy");

        copy_tree(&source, &destination).unwrap();

        let link = destination.join("link");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), outside);
    }

    #[test]
    fn test_failed_copy_leaves_source_in_place() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("show");
        create_sized(&source.join("ep1.mkv"), 10);
        let blocker = tmp.path().join("blocker");
        create_sized(&blocker, 1);

        // The destination's parent is a plain file, so nothing can be created.
        let result = copy_then_remove(&source, &blocker.join("show"));

        assert!(matches!(result, Err(RelocateError::Io { action: "copy", .. })));
        assert!(source.join("ep1.mkv").exists());
    }

    /// A scratch directory on a different filesystem from the default
    /// temporary directory, if this machine has one.
    #[cfg(target_os = "linux")]
    fn other_filesystem(reference: &Path) -> Option<TempDir> {
        use std::os::unix::fs::MetadataExt;

        let dev = fs::metadata(reference).ok()?.dev();
        ["/dev/shm", "/run/user", "/var/tmp"]
            .iter()
            .map(Path::new)
            .filter(|candidate| {
                fs::metadata(candidate).is_ok_and(|meta| meta.is_dir() && meta.dev() != dev)
            })
            .find_map(|candidate| TempDir::new_in(candidate).ok())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_moves_across_filesystems() {
        let (_tmp, source, _target) = setup();
        let Some(elsewhere) = other_filesystem(&source) else {
            eprintln!("no second filesystem available, skipping");
            return;
        };

        let result = relocator(false).relocate(&source, elsewhere.path());

        assert!(result.is_success(), "{:?}", result.error);
        assert_eq!(result.moves.len(), 1);
        assert!(!source.join("big-show").exists());
        assert_eq!(
            fs::metadata(elsewhere.path().join("big-show/ep1.mkv"))
                .unwrap()
                .len(),
            500
        );
        assert!(source.join("small-show").exists());
    }
}
