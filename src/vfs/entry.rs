use std::path::{Path, PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// One item of a listing: a host path and what it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    entry_type: EntryType,
}

impl Entry {
    pub fn new<P: AsRef<Path>>(path: P, entry_type: EntryType) -> Entry {
        Entry {
            path: path.as_ref().to_path_buf(),
            entry_type,
        }
    }

    /// Reads the kind from the host; anything that is not a directory counts as a file.
    pub(crate) fn from_host(path: PathBuf) -> Entry {
        let entry_type = if path.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };
        Entry { path, entry_type }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}
