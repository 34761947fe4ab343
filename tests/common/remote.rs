//! In-memory remote host.
//!
//! Implements `upssh::RemoteFs` over a set of directories and a map of files,
//! recording every call so scenarios can assert on what touched the host.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use upssh::{Endpoint, RemoteError, RemoteFs, RemoteResult};

/// One recorded call, as `(operation, path)`
pub type Call = (&'static str, String);

#[derive(Default)]
pub struct MemoryRemote {
    pub dirs: RefCell<BTreeSet<String>>,
    pub files: RefCell<BTreeMap<String, String>>,
    pub calls: RefCell<Vec<Call>>,
    pub connected: bool,
}

fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

impl MemoryRemote {
    /// Host with `dirs` (and their ancestors) already present
    pub fn with_dirs(dirs: &[&str]) -> Self {
        let remote = Self::default();
        for dir in dirs {
            remote.add_dir_all(dir);
        }
        remote
    }

    pub fn add_file(&self, path: &str, content: &str) {
        self.add_dir_all(parent(path));
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
    }

    fn add_dir_all(&self, path: &str) {
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            self.dirs.borrow_mut().insert(current.clone());
        }
    }

    pub fn has_dir(&self, path: &str) -> bool {
        path == "/" || self.dirs.borrow().contains(path)
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Paths passed to mkdir, rename (source) and put
    pub fn mutated_paths(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(op, _)| matches!(*op, "mkdir" | "mkdir -p" | "rename" | "put"))
            .map(|(_, path)| path.clone())
            .collect()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|(o, _)| *o == op).count()
    }

    fn record(&self, op: &'static str, path: &str) {
        self.calls.borrow_mut().push((op, path.to_string()));
    }

    fn exists_now(&self, path: &str) -> bool {
        self.has_dir(path) || self.files.borrow().contains_key(path)
    }
}

impl RemoteFs for MemoryRemote {
    fn connect(&mut self, endpoint: &Endpoint) -> RemoteResult<()> {
        self.record("connect", &endpoint.host);
        self.connected = true;
        Ok(())
    }

    fn exists(&self, path: &str) -> RemoteResult<bool> {
        self.record("exists", path);
        Ok(self.exists_now(path))
    }

    fn mkdir(&self, path: &str, recursive: bool) -> RemoteResult<()> {
        if recursive {
            self.record("mkdir -p", path);
            self.add_dir_all(path);
            return Ok(());
        }
        self.record("mkdir", path);
        if self.exists_now(path) || !self.has_dir(parent(path)) {
            return Err(RemoteError::operation("mkdir", path, "cannot create directory"));
        }
        self.dirs.borrow_mut().insert(path.to_string());
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> RemoteResult<()> {
        self.record("rename", from);
        if !self.exists_now(from) || self.exists_now(to) || !self.has_dir(parent(to)) {
            return Err(RemoteError::operation("rename", from, "cannot move"));
        }
        let prefix = format!("{}/", from);
        let relocate = |p: &str| format!("{}{}", to, &p[from.len()..]);

        let moved_dirs: Vec<String> = self
            .dirs
            .borrow()
            .iter()
            .filter(|d| d.as_str() == from || d.starts_with(&prefix))
            .cloned()
            .collect();
        for dir in moved_dirs {
            self.dirs.borrow_mut().remove(&dir);
            self.dirs.borrow_mut().insert(relocate(&dir));
        }

        let moved_files: Vec<String> = self
            .files
            .borrow()
            .keys()
            .filter(|f| f.as_str() == from || f.starts_with(&prefix))
            .cloned()
            .collect();
        for file in moved_files {
            let content = self.files.borrow_mut().remove(&file).unwrap_or_default();
            self.files.borrow_mut().insert(relocate(&file), content);
        }
        Ok(())
    }

    fn put(&self, local: &Path, remote: &str) -> RemoteResult<()> {
        self.record("put", remote);
        if !self.has_dir(parent(remote)) {
            return Err(RemoteError::operation("put", remote, "no such directory"));
        }
        let content = std::fs::read_to_string(local).map_err(|source| RemoteError::LocalRead {
            path: local.to_path_buf(),
            source,
        })?;
        self.files.borrow_mut().insert(remote.to_string(), content);
        Ok(())
    }

    fn disconnect(&mut self) -> RemoteResult<()> {
        self.record("disconnect", "");
        self.connected = false;
        Ok(())
    }
}
