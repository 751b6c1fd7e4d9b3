mod error;
pub(crate) mod utils;

pub use error::{ErrorKind, FsError};

use crate::Entry;

/// Setup-time result: construction and configuration loading.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Outcome of a single file operation.
pub type OpResult<T> = std::result::Result<T, FsError>;

/// Shell-like operation set over a virtual root.
///
/// Every path argument is a *virtual* path: a leading `/` means "the virtual root", `~` means the
/// user's home directory, `""` and `*` mean the virtual root itself.
/// Only `cd` changes the virtual root.
pub trait FsBackend {
    /// Returns the current virtual root as a string.
    fn pwd(&self) -> String;

    /// Moves the virtual root. On failure the root is left untouched.
    fn cd(&mut self, path: &str) -> OpResult<()>;

    /// Returns true if `path` resolves to an existing host entry.
    fn exists(&self, path: &str) -> bool;

    /// Lists a directory, replacing each sub-directory with its immediate children.
    fn ls(&self, path: &str) -> OpResult<Vec<Entry>>;

    /// Copies a file together with its timestamps, creating missing destination parents.
    fn cp(&self, src: &str, dst: &str) -> OpResult<()>;

    /// Moves a file or directory, creating missing destination parents.
    fn mv(&self, src: &str, dst: &str) -> OpResult<()>;

    /// Removes a single file.
    fn rm(&self, name: &str) -> OpResult<()>;

    /// Removes a directory with all its contents.
    fn rmdir(&self, name: &str) -> OpResult<()>;

    /// Creates a directory and its missing parents. Fails if the directory is already there.
    fn mkdir(&self, name: &str) -> OpResult<()>;

    /// Creates an empty file. Fails if the file is already there.
    fn touch(&self, name: &str) -> OpResult<()>;
}
