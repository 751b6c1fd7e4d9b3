use std::io;
use std::path::{Component, Path, PathBuf};

use filetime::FileTime;

/// Folds `.` and `..` components of a host path without touching the filesystem.
/// `..` at the filesystem root is dropped.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() && !result.has_root() {
                    result.push(component);
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Make directories recursively.
/// * `path` is an absolute host path.
/// Returns vector of created directories, outermost first.
pub fn mkdir_all<P: AsRef<Path>>(path: P) -> io::Result<Vec<PathBuf>> {
    let host_path = path.as_ref();

    // Looking for the first existing parent
    let mut existed_part = host_path;
    while !existed_part.exists() {
        match existed_part.parent() {
            Some(parent) => existed_part = parent,
            None => break,
        }
    }

    let need_to_create: Vec<_> = host_path
        .strip_prefix(existed_part)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .components()
        .collect();

    let mut created = Vec::new();
    let mut built = existed_part.to_path_buf();
    for component in need_to_create {
        built.push(component);
        std::fs::create_dir(&built)?;
        created.push(built.clone());
    }

    Ok(created)
}

/// Copies `src` onto `dst` and carries over access and modification times.
pub fn copy_with_times(src: &Path, dst: &Path) -> io::Result<u64> {
    let copied = std::fs::copy(src, dst)?;
    let meta = std::fs::metadata(src)?;
    filetime::set_file_times(
        dst,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )?;
    Ok(copied)
}

/// Immediate children of a host directory, sorted by path.
pub fn read_dir_sorted(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut children = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}
