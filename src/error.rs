//! Error kinds raised while resolving and enumerating listing targets.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to resolve or enumerate a single path.
///
/// Identity lookups have no variant here: a missing passwd/group record
/// degrades to the numeric id inside the resolver and never surfaces.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("{}: No such file or directory", path.display())]
    NotFound { path: PathBuf },

    #[error("{}: Permission denied", path.display())]
    PermissionDenied { path: PathBuf },

    /// The path is not a directory. The dispatcher treats this as a cue to
    /// render the path as a singleton entry.
    #[error("{}: Not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    /// Classify an I/O error raised for `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ListError::NotFound { path },
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied { path },
            _ if is_not_a_directory(&err) => ListError::NotADirectory { path },
            _ => ListError::Traversal { path, source: err },
        }
    }

    /// Classify a walkdir error, falling back to `path` when the error
    /// does not carry one.
    pub fn from_walkdir(path: &Path, err: walkdir::Error) -> Self {
        let at = err.path().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf());
        match err.into_io_error() {
            Some(io_err) => ListError::from_io(&at, io_err),
            None => ListError::Traversal {
                path: at,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }

    /// The path this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ListError::NotFound { path }
            | ListError::PermissionDenied { path }
            | ListError::NotADirectory { path }
            | ListError::Traversal { path, .. } => path,
        }
    }
}

#[cfg(unix)]
fn is_not_a_directory(err: &io::Error) -> bool {
    // ENOTDIR
    err.raw_os_error() == Some(20)
}

#[cfg(not(unix))]
fn is_not_a_directory(_err: &io::Error) -> bool {
    false
}
