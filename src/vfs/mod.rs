mod entry;
mod rooted_fs;

pub use entry::{Entry, EntryType};
pub use rooted_fs::{RootedFS, RootedFSBuilder};
