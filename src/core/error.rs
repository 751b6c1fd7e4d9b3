use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Coarse classification of an [`FsError`], stable across messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Resolution,
    NotFound,
    WrongType,
    AlreadyExists,
    InvalidArgument,
    Io,
}

/// Failure outcome of a `RootedFS` operation.
///
/// Every operation converts host failures into one of these variants, so callers always get a
/// definite outcome and a readable reason.
#[derive(Debug, Error)]
pub enum FsError {
    /// The virtual path could not be mapped onto a host path.
    #[error("cannot resolve '{path}': {reason}")]
    Resolution { path: String, reason: String },

    /// The resolved target does not exist.
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The resolved target exists but has the wrong kind.
    #[error("{} is not a {expected}", path.display())]
    WrongType { path: PathBuf, expected: &'static str },

    /// The target of a creating operation is already there.
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// The argument is structurally invalid; nothing was touched.
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: String, reason: &'static str },

    /// The host primitive failed after all preconditions passed.
    #[error("{op} failed on {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::Resolution { .. } => ErrorKind::Resolution,
            FsError::NotFound(_) => ErrorKind::NotFound,
            FsError::WrongType { .. } => ErrorKind::WrongType,
            FsError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            FsError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            FsError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn resolution(path: &str, reason: impl Into<String>) -> Self {
        FsError::Resolution {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(arg: &str, reason: &'static str) -> Self {
        FsError::InvalidArgument {
            arg: arg.to_string(),
            reason,
        }
    }

    pub(crate) fn not_dir<P: AsRef<Path>>(path: P) -> Self {
        FsError::WrongType {
            path: path.as_ref().to_path_buf(),
            expected: "directory",
        }
    }

    pub(crate) fn not_file<P: AsRef<Path>>(path: P) -> Self {
        FsError::WrongType {
            path: path.as_ref().to_path_buf(),
            expected: "file",
        }
    }

    /// Wraps a host error. `AlreadyExists` and `NotFound` from the host keep their own kinds.
    pub(crate) fn io<P: AsRef<Path>>(op: &'static str, path: P, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            io::ErrorKind::NotFound => FsError::NotFound(path),
            _ => FsError::Io { op, path, source },
        }
    }
}
