//! Local File System Snapshot
//!
//! Lists one directory level at a time for the synchronizer. A level is read
//! completely before any of its entries is processed, and entries come back
//! sorted by name so a walk is deterministic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a directory entry is, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symlink, device, socket, fifo, or a name that is not valid UTF-8
    Unsupported,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// List the entries of `dir`, sorted lexicographically by name.
pub fn list_dir(dir: &Path) -> io::Result<Vec<LocalEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();

        let (name, kind) = match entry.file_name().into_string() {
            Ok(name) if file_type.is_dir() => (name, EntryKind::Directory),
            Ok(name) if file_type.is_file() => (name, EntryKind::File),
            Ok(name) => (name, EntryKind::Unsupported),
            Err(raw) => (raw.to_string_lossy().into_owned(), EntryKind::Unsupported),
        };

        entries.push(LocalEntry { name, path, kind });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
