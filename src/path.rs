//! Virtual path parsing and resolution against a virtual root.
//!
//! A virtual path is what the caller types. It is never handed to the host as-is: it is split
//! into segments, `.` segments are dropped and `..` segments are folded, then the remaining
//! segments are joined onto the virtual root. A `..` that would climb above the root is clamped,
//! so a nested path can never address anything outside the root.

use std::path::{Path, PathBuf};

use crate::core::{FsError, OpResult};

/// Marker that anchors a virtual path at the virtual root.
pub const SEPARATOR: char = '/';

/// A parsed caller-supplied path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualPath {
    /// `~`: the real home directory of the user.
    Home,
    /// `""` or `*`: the virtual root itself.
    Root,
    /// Anything else: normalized segments below the virtual root.
    Nested {
        segments: Vec<String>,
        /// Set when at least one `..` was dropped at the root boundary.
        clamped: bool,
    },
}

impl VirtualPath {
    pub fn parse(raw: &str) -> OpResult<Self> {
        match raw {
            "~" => return Ok(VirtualPath::Home),
            "" | "*" => return Ok(VirtualPath::Root),
            _ => {}
        }

        let body = raw.strip_prefix(SEPARATOR).unwrap_or(raw);
        let mut segments: Vec<String> = Vec::new();
        let mut clamped = false;

        for segment in body.split(SEPARATOR) {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        clamped = true;
                    }
                }
                s if s.contains('\0') => {
                    return Err(FsError::resolution(raw, "path contains a NUL byte"));
                }
                s => segments.push(s.to_string()),
            }
        }

        Ok(VirtualPath::Nested { segments, clamped })
    }

    /// Segments below the root; empty for `Home` and `Root`.
    pub fn segments(&self) -> &[String] {
        match self {
            VirtualPath::Nested { segments, .. } => segments,
            _ => &[],
        }
    }

    pub fn is_clamped(&self) -> bool {
        matches!(self, VirtualPath::Nested { clamped: true, .. })
    }

    /// Joins the path onto `root`, or onto `home` for `~`.
    pub fn join_onto(&self, root: &Path, home: Option<&Path>) -> OpResult<PathBuf> {
        match self {
            VirtualPath::Home => home
                .map(Path::to_path_buf)
                .ok_or_else(|| FsError::resolution("~", "home directory is unknown")),
            VirtualPath::Root => Ok(root.to_path_buf()),
            VirtualPath::Nested { segments, .. } => {
                let mut path = root.to_path_buf();
                for segment in segments {
                    path.push(segment);
                }
                debug_assert!(path.starts_with(root));
                Ok(path)
            }
        }
    }
}

/// Resolves a caller-supplied path against `root`.
///
/// Pure: the host filesystem is not consulted, so existence and kind are left to the caller.
pub fn resolve(raw: &str, root: &Path, home: Option<&Path>) -> OpResult<PathBuf> {
    let path = VirtualPath::parse(raw)?;
    if path.is_clamped() {
        tracing::trace!(raw, depth = path.segments().len(), "clamped `..` at the virtual root");
    }
    path.join_onto(root, home)
}

/// True when the caller's path ends with the separator, e.g. `/a/b/`.
pub fn has_trailing_separator(raw: &str) -> bool {
    raw.ends_with(SEPARATOR)
}

/// True when the caller's path has at least one separator, i.e. is hierarchical.
pub fn is_hierarchical(raw: &str) -> bool {
    raw.contains(SEPARATOR)
}
