//! Shell-like file operations confined to a movable virtual root.
//!
//! ### Overview
//!
//! `vroot-kit` exposes the familiar `ls`, `cp`, `mv`, `rm`, `rmdir`, `mkdir`, `touch`, `pwd` and
//! `cd` over a real directory of the host filesystem. Paths given by the caller are *virtual*:
//! they are read against the current virtual root, not against the process working directory.
//!
//! **Key ideas**:
//! - **Confinement**: a leading `/` means the virtual root, and `..` segments are clamped at it,
//!   so nested paths never leave the root. Only `cd ..` and `cd ~` move the root outward.
//! - **Structured paths**: virtual paths are parsed into segments ([`VirtualPath`]) before they
//!   are joined onto the root.
//! - **Definite outcomes**: every operation returns an [`OpResult`] whose error carries an
//!   [`ErrorKind`] and a readable reason.
//! - **Observability**: operations report entry and exit to an injected [`Observer`];
//!   [`TracingObserver`] forwards them to `tracing`.
//!
//! ### Example
//!
//! ```no_run
//! use vroot_kit::{FsBackend, RootedFS};
//!
//! let mut fs = RootedFS::builder().root("/srv/data").build().unwrap();
//! fs.mkdir("/reports/2024").unwrap();
//! fs.touch("/reports/2024/summary.txt").unwrap();
//! fs.cd("/reports").unwrap();
//! for entry in fs.ls("").unwrap() {
//!     println!("{}", entry.path().display());
//! }
//! ```

mod config;
mod core;
mod observe;
pub mod path;
mod vfs;

pub use config::{ENV_DEBUG, ENV_HOME, Settings};
pub use crate::core::{ErrorKind, FsBackend, FsError, OpResult, Result};
pub use observe::{NoopObserver, Observer, Op, TracingObserver};
pub use path::VirtualPath;
pub use vfs::{Entry, EntryType, RootedFS, RootedFSBuilder};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
