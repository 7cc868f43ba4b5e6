//! Error types for directory relocation.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Reasons a relocation run stops early.
#[derive(Debug, Error)]
pub enum RelocateError {
    /// The source directory, the target directory, or a subdirectory being
    /// moved does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Something already occupies the destination path.
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Any other filesystem failure.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RelocateError {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// `NotFound` becomes [`RelocateError::DirectoryNotFound`]; everything
    /// else is wrapped as [`RelocateError::Io`].
    #[must_use]
    pub fn from_io(action: &'static str, path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::DirectoryNotFound(path)
        } else {
            Self::Io {
                action,
                path,
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified() {
        let err = RelocateError::from_io(
            "list",
            PathBuf::from("/nowhere"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, RelocateError::DirectoryNotFound(_)));
        assert_eq!(err.to_string(), "directory not found: /nowhere");
    }

    #[test]
    fn test_other_io_errors_keep_context() {
        let err = RelocateError::from_io(
            "move",
            PathBuf::from("/src/a"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, RelocateError::Io { action: "move", .. }));
        assert!(err.to_string().starts_with("failed to move /src/a: "));
    }

    #[test]
    fn test_destination_exists_message() {
        let err = RelocateError::DestinationExists(PathBuf::from("/dst/a"));
        assert_eq!(err.to_string(), "destination already exists: /dst/a");
    }
}
