use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while picking and listing a directory.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The directory prompt was dismissed. Callers treat this as a no-op.
    #[error("directory selection cancelled")]
    Cancelled,

    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("access denied: {}", .path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LibraryError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
