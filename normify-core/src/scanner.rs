use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One regular file found by enumeration. Immutable, scoped to a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// The file's parent folder
    pub parent: PathBuf,
    /// Base name, lossy-decoded for display and name building
    pub name: String,
}

impl FileEntry {
    fn new(path: PathBuf) -> Self {
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, parent, name }
    }
}

/// Result of enumerating a root folder.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Files in processing order: case-insensitive by parent path, then by
    /// name. Per-folder numbering and report grouping depend on this order.
    pub files: Vec<FileEntry>,
    /// Directories (recursive mode only) with no regular files anywhere
    /// below them, root included. Informational, never acted upon.
    pub empty_folders: Vec<PathBuf>,
}

/// List the regular files under `root`.
///
/// Non-recursive mode lists direct children only. Recursive mode walks the
/// whole subtree and also reports empty folders. Fails before any rename
/// can happen if `root` is missing or not a directory; finding zero files
/// is not an error.
pub fn enumerate(root: &Path, recursive: bool) -> Result<Enumeration> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    if recursive {
        enumerate_recursive(root)
    } else {
        enumerate_flat(root)
    }
}

fn enumerate_flat(root: &Path) -> Result<Enumeration> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(FileEntry::new(entry.path()));
        }
    }
    files.sort_by_key(|f| f.name.to_lowercase());

    Ok(Enumeration {
        files,
        empty_folders: Vec::new(),
    })
}

fn enumerate_recursive(root: &Path) -> Result<Enumeration> {
    let mut files = Vec::new();
    let mut dirs: BTreeSet<PathBuf> = BTreeSet::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"))
        })?;
        if entry.file_type().is_dir() {
            dirs.insert(entry.path().to_path_buf());
        } else if entry.file_type().is_file() {
            files.push(FileEntry::new(entry.path().to_path_buf()));
        }
    }

    files.sort_by(|a, b| {
        let ka = (
            a.parent.to_string_lossy().to_lowercase(),
            a.name.to_lowercase(),
        );
        let kb = (
            b.parent.to_string_lossy().to_lowercase(),
            b.name.to_lowercase(),
        );
        ka.cmp(&kb)
    });

    // A directory is empty when no enumerated file lives at or below it
    let empty_folders = dirs
        .into_iter()
        .filter(|dir| !files.iter().any(|f| f.path.starts_with(dir)))
        .collect();

    Ok(Enumeration {
        files,
        empty_folders,
    })
}
