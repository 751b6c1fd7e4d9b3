//! Operation tracing hooks.
//!
//! `RootedFS` reports the entry and exit of every operation to an [`Observer`] supplied at
//! construction. The default observer forwards them to `tracing`.

use std::fmt;

use crate::core::FsError;

/// Names the operation being observed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    Pwd,
    Cd,
    Exists,
    Ls,
    Cp,
    Mv,
    Rm,
    Rmdir,
    Mkdir,
    Touch,
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Op::Pwd => "pwd",
            Op::Cd => "cd",
            Op::Exists => "exists",
            Op::Ls => "ls",
            Op::Cp => "cp",
            Op::Mv => "mv",
            Op::Rm => "rm",
            Op::Rmdir => "rmdir",
            Op::Mkdir => "mkdir",
            Op::Touch => "touch",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Observer {
    /// Called before the operation resolves any path.
    fn on_enter(&self, op: Op, args: &[&str]);

    /// Called once with the final outcome.
    fn on_exit(&self, op: Op, outcome: Result<(), &FsError>);
}

/// Emits `tracing` events. With `verbose` off only failures are visible above `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver {
    verbose: bool,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl Observer for TracingObserver {
    fn on_enter(&self, op: Op, args: &[&str]) {
        if self.is_verbose() {
            tracing::debug!(op = op.name(), ?args, "call");
        } else {
            tracing::trace!(op = op.name(), ?args, "call");
        }
    }

    fn on_exit(&self, op: Op, outcome: Result<(), &FsError>) {
        match outcome {
            Ok(()) if self.is_verbose() => tracing::debug!(op = op.name(), "done"),
            Ok(()) => tracing::trace!(op = op.name(), "done"),
            Err(e) => tracing::warn!(op = op.name(), kind = ?e.kind(), "{e}"),
        }
    }
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_enter(&self, _op: Op, _args: &[&str]) {}

    fn on_exit(&self, _op: Op, _outcome: Result<(), &FsError>) {}
}
