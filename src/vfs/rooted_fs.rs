//! This module provides a file manager whose paths are interpreted against a movable virtual
//! root on the host filesystem instead of the process working directory.
//!
//! ### Key Features:
//! - **Confined paths**: every argument goes through [`crate::path::resolve`]; `..` cannot climb
//!   above the virtual root.
//! - **Navigation**: `cd` is the only operation that moves the root, and a failed `cd` leaves it
//!   where it was.
//! - **Definite outcomes**: host failures come back as [`FsError`] values, never as panics.
//! - **Observed**: entry and exit of each operation are reported to an injected [`Observer`].

use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use crate::config::Settings;
use crate::core::{FsBackend, FsError, OpResult, Result, utils};
use crate::observe::{Observer, Op, TracingObserver};
use crate::path::{self, SEPARATOR};
use crate::Entry;

/// Shell-like file manager rooted at a directory of the host filesystem.
///
/// The virtual root starts at the process working directory (or the directory given to
/// [`RootedFSBuilder::root`]) and always names an existing directory.
///
/// ### Usage notes:
/// - Not thread‑safe and not reentrant; one operation at a time.
/// - Multi-step operations are not atomic. Directories created for a `cp`/`mv` destination stay
///   in place if the copy or move itself then fails.
/// - Cross-device moves are left to the host `rename`, which may refuse them.
///
/// ### Example:
/// ```no_run
/// use vroot_kit::{FsBackend, RootedFS};
///
/// let mut fs = RootedFS::new().unwrap();
/// fs.mkdir("/docs/drafts").unwrap();
/// fs.touch("/docs/drafts/note.txt").unwrap();
/// fs.cd("/docs").unwrap();
/// assert!(fs.exists("/drafts/note.txt"));
/// ```
pub struct RootedFS {
    root: PathBuf,         // host absolute path, always an existing directory
    home: Option<PathBuf>, // target of `~`
    observer: Box<dyn Observer>,
}

impl RootedFS {
    /// Creates a manager rooted at the current working directory.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> RootedFSBuilder {
        RootedFSBuilder::default()
    }

    /// Returns the virtual root as a host path.
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the directory `~` resolves to, if known.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Maps a virtual path onto the host without touching the filesystem.
    pub fn resolve(&self, path: &str) -> OpResult<PathBuf> {
        let host = path::resolve(path, &self.root, self.home())?;
        tracing::trace!(virtual_path = path, host = %host.display(), "resolved");
        Ok(host)
    }

    fn finish<T>(&self, op: Op, result: OpResult<T>) -> OpResult<T> {
        self.observer.on_exit(op, result.as_ref().map(|_| ()));
        result
    }

    fn change_root(&mut self, path: &str) -> OpResult<()> {
        let target = match CdTarget::classify(path) {
            CdTarget::Home => self
                .home
                .clone()
                .ok_or_else(|| FsError::resolution(path, "home directory is unknown"))?,
            CdTarget::Up => self
                .root
                .parent()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    FsError::resolution(path, "the root has no ancestor two levels up")
                })?,
            CdTarget::Stay => self.root.clone(),
            CdTarget::Absolute | CdTarget::Relative | CdTarget::Child => self.resolve(path)?,
        };

        if !target.exists() {
            return Err(FsError::NotFound(target));
        }
        if !target.is_dir() {
            return Err(FsError::not_dir(target));
        }

        tracing::debug!(from = %self.root.display(), to = %target.display(), "root changed");
        self.root = target;
        Ok(())
    }

    fn list(&self, path: &str) -> OpResult<Vec<Entry>> {
        let target = self.resolve(path)?;
        if !target.exists() {
            return Err(FsError::NotFound(target));
        }
        if !target.is_dir() {
            return Err(FsError::not_dir(target));
        }

        let read = |dir: &Path| {
            utils::read_dir_sorted(dir).map_err(|e| FsError::io("read directory", dir, e))
        };

        let mut entries = Vec::new();
        for child in read(&target)? {
            if child.is_dir() {
                entries.extend(read(&child)?.into_iter().map(Entry::from_host));
            } else {
                entries.push(Entry::from_host(child));
            }
        }
        Ok(entries)
    }

    /// Resolves `src` and `dst` for a copy or move.
    /// An existing directory as `dst` means "inside that directory, under the source name".
    fn transfer_paths(&self, src: &str, dst: &str) -> OpResult<(PathBuf, PathBuf)> {
        let src_path = self.resolve(src)?;
        let mut dst_path = self.resolve(dst)?;

        if std::fs::symlink_metadata(&src_path).is_err() {
            return Err(FsError::NotFound(src_path));
        }
        if dst_path.is_dir() {
            if let Some(name) = src_path.file_name() {
                dst_path.push(name);
            }
        }
        Ok((src_path, dst_path))
    }

    /// Creates the missing parents of a destination.
    fn prepare_destination(dst: &Path) -> OpResult<()> {
        let Some(parent) = dst.parent() else {
            return Ok(());
        };
        if parent.exists() {
            return Ok(());
        }
        let created = utils::mkdir_all(parent).map_err(|source| FsError::Io {
            op: "create destination directory",
            path: parent.to_path_buf(),
            source,
        })?;
        tracing::trace!(count = created.len(), "created destination directories");
        Ok(())
    }

    fn copy(&self, src: &str, dst: &str) -> OpResult<()> {
        let (src_path, dst_path) = self.transfer_paths(src, dst)?;
        if src_path.is_dir() {
            return Err(FsError::not_file(src_path));
        }
        if src_path == dst_path {
            return Err(FsError::invalid(dst, "source and destination are the same file"));
        }

        Self::prepare_destination(&dst_path)?;
        let bytes = utils::copy_with_times(&src_path, &dst_path)
            .map_err(|e| FsError::io("copy", &src_path, e))?;
        tracing::trace!(bytes, "copied");
        Ok(())
    }

    fn moving(&self, src: &str, dst: &str) -> OpResult<()> {
        let (src_path, dst_path) = self.transfer_paths(src, dst)?;
        if self.root.starts_with(&src_path) {
            return Err(FsError::invalid(src, "cannot move the virtual root or its ancestor"));
        }
        if dst_path != src_path && dst_path.starts_with(&src_path) {
            return Err(FsError::invalid(dst, "cannot move a directory into itself"));
        }

        Self::prepare_destination(&dst_path)?;
        std::fs::rename(&src_path, &dst_path).map_err(|e| FsError::io("move", &src_path, e))
    }

    fn remove_file(&self, name: &str) -> OpResult<()> {
        let target = self.resolve(name)?;
        let meta = std::fs::symlink_metadata(&target)
            .map_err(|_| FsError::NotFound(target.clone()))?;
        if meta.is_dir() {
            return Err(FsError::not_file(target));
        }
        std::fs::remove_file(&target).map_err(|e| FsError::io("remove file", &target, e))
    }

    fn remove_dir(&self, name: &str) -> OpResult<()> {
        let target = self.resolve(name)?;
        if self.root.starts_with(&target) {
            return Err(FsError::invalid(name, "cannot remove the virtual root or its ancestor"));
        }
        if !target.exists() {
            return Err(FsError::NotFound(target));
        }
        if !target.is_dir() {
            return Err(FsError::not_dir(target));
        }
        std::fs::remove_dir_all(&target).map_err(|e| FsError::io("remove directory", &target, e))
    }

    fn make_dir(&self, name: &str) -> OpResult<()> {
        if path::has_trailing_separator(name) {
            return Err(FsError::invalid(name, "path ends with a separator"));
        }
        if !path::is_hierarchical(name) {
            return Err(FsError::invalid(name, "not a valid hierarchical path"));
        }

        let target = self.resolve(name)?;
        if std::fs::symlink_metadata(&target).is_ok() {
            return Err(FsError::AlreadyExists(target));
        }
        let created = utils::mkdir_all(&target).map_err(|source| FsError::Io {
            op: "create directory",
            path: target.clone(),
            source,
        })?;
        tracing::trace!(count = created.len(), "created directories");
        Ok(())
    }

    fn make_file(&self, name: &str) -> OpResult<()> {
        if path::has_trailing_separator(name) {
            return Err(FsError::invalid(name, "file name ends with a separator"));
        }
        if !path::is_hierarchical(name) {
            return Err(FsError::invalid(name, "not a valid hierarchical path"));
        }

        let target = self.resolve(name)?;
        if std::fs::symlink_metadata(&target).is_ok() {
            return Err(FsError::AlreadyExists(target));
        }
        if let Some(parent) = target.parent() {
            if !parent.exists() {
                return Err(FsError::NotFound(parent.to_path_buf()));
            }
            if !parent.is_dir() {
                return Err(FsError::not_dir(parent));
            }
        }
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .map(drop)
            .map_err(|e| FsError::io("create file", &target, e))
    }
}

impl FsBackend for RootedFS {
    /// Returns the virtual root related to the host file system.
    fn pwd(&self) -> String {
        self.observer.on_enter(Op::Pwd, &[]);
        let root = self.root.to_string_lossy().into_owned();
        self.observer.on_exit(Op::Pwd, Ok(()));
        root
    }

    /// Changes the virtual root.
    ///
    /// * `~` - the home directory.
    /// * `..`-prefixed - two levels above the current root.
    /// * `""` or `*` - stays where it is.
    /// * `/`-prefixed, `.`-prefixed or a plain name - resolved below the current root.
    ///
    /// The target must be an existing directory; nothing is created.
    fn cd(&mut self, path: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Cd, &[path]);
        let result = self.change_root(path);
        self.finish(Op::Cd, result)
    }

    fn exists(&self, path: &str) -> bool {
        self.observer.on_enter(Op::Exists, &[path]);
        let result = self.resolve(path).map(|host| host.exists());
        let exists = matches!(result, Ok(true));
        self.finish(Op::Exists, result.map(|_| ())).ok();
        exists
    }

    /// Returns a flattened listing of `path`, sorted by host path.
    ///
    /// Files are listed as they are. A sub-directory is replaced by its immediate children, so
    /// for `x` and `d/y` the listing holds `x` and `d/y` but not `d`.
    fn ls(&self, path: &str) -> OpResult<Vec<Entry>> {
        self.observer.on_enter(Op::Ls, &[path]);
        let result = self.list(path);
        self.finish(Op::Ls, result)
    }

    /// Copies the file `src` to `dst` with its access and modification times.
    /// Missing parents of `dst` are created first; they are not removed if the copy fails.
    fn cp(&self, src: &str, dst: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Cp, &[src, dst]);
        let result = self.copy(src, dst);
        self.finish(Op::Cp, result)
    }

    /// Moves `src` (a file or a directory) to `dst`.
    /// Missing parents of `dst` are created first; they are not removed if the move fails.
    fn mv(&self, src: &str, dst: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Mv, &[src, dst]);
        let result = self.moving(src, dst);
        self.finish(Op::Mv, result)
    }

    /// Removes a single file. Directories are rejected, use `rmdir` for them.
    fn rm(&self, name: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Rm, &[name]);
        let result = self.remove_file(name);
        self.finish(Op::Rm, result)
    }

    /// Removes a directory and everything below it.
    fn rmdir(&self, name: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Rmdir, &[name]);
        let result = self.remove_dir(name);
        self.finish(Op::Rmdir, result)
    }

    /// Creates a directory and all its missing parents.
    ///
    /// `name` must contain a separator and must not end with one. A second call with the same
    /// `name` fails with `AlreadyExists`.
    fn mkdir(&self, name: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Mkdir, &[name]);
        let result = self.make_dir(name);
        self.finish(Op::Mkdir, result)
    }

    /// Creates an empty file. The parent directory must already exist.
    fn touch(&self, name: &str) -> OpResult<()> {
        self.observer.on_enter(Op::Touch, &[name]);
        let result = self.make_file(name);
        self.finish(Op::Touch, result)
    }
}

impl fmt::Debug for RootedFS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootedFS")
            .field("root", &self.root)
            .field("home", &self.home)
            .finish_non_exhaustive()
    }
}

/// How `cd` reads its argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CdTarget {
    Home,
    Up,
    Stay,
    Absolute,
    Relative,
    Child,
}

impl CdTarget {
    fn classify(path: &str) -> Self {
        if path == "~" {
            CdTarget::Home
        } else if path.starts_with("..") {
            CdTarget::Up
        } else if path.is_empty() || path == "*" {
            CdTarget::Stay
        } else if path.starts_with(SEPARATOR) {
            CdTarget::Absolute
        } else if path.starts_with('.') {
            CdTarget::Relative
        } else {
            CdTarget::Child
        }
    }
}

/// Configures a [`RootedFS`].
#[derive(Default)]
pub struct RootedFSBuilder {
    root: Option<PathBuf>,
    home: Option<Option<PathBuf>>,
    observer: Option<Box<dyn Observer>>,
}

impl RootedFSBuilder {
    /// Starts at `root` instead of the working directory.
    /// `root` must be an absolute path of an existing directory.
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Uses `home` for `~` instead of the OS home directory.
    pub fn home<P: Into<PathBuf>>(mut self, home: P) -> Self {
        self.home = Some(Some(home.into()));
        self
    }

    /// Makes every `~` fail to resolve.
    pub fn without_home(mut self) -> Self {
        self.home = Some(None);
        self
    }

    pub fn observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Applies `debug` and `home` from settings. Explicit builder calls made later win.
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.observer = Some(Box::new(TracingObserver::new(settings.debug)));
        if let Some(home) = &settings.home {
            self.home = Some(Some(home.clone()));
        }
        self
    }

    pub fn build(self) -> Result<RootedFS> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("unable to read the working directory")?,
        };

        if root.as_os_str().is_empty() {
            return Err(anyhow!("invalid root path: empty"));
        }
        if root.is_relative() {
            return Err(anyhow!("the root path must be absolute"));
        }

        let root = utils::normalize(root);
        if !root.is_dir() {
            return Err(anyhow!("{:?} is not an existing directory", root));
        }

        let home = self
            .home
            .unwrap_or_else(dirs::home_dir)
            .map(utils::normalize);
        let observer = self
            .observer
            .unwrap_or_else(|| Box::new(TracingObserver::default()));

        tracing::debug!(root = %root.display(), "rooted fs created");
        Ok(RootedFS {
            root,
            home,
            observer,
        })
    }
}
