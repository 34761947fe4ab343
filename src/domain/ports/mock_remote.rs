//! In-memory RemoteFs for tests
//!
//! Keeps a tree of directories and files, records every call in order and
//! can be told to fail a given primitive on a given path.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::remote_fs::{Endpoint, RemoteError, RemoteFs, RemoteResult};

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOp {
    Connect(String),
    Exists(String),
    Mkdir { path: String, recursive: bool },
    Rename { from: String, to: String },
    Put { local: PathBuf, remote: String },
    Disconnect,
}

#[derive(Debug, Default)]
pub struct MockRemote {
    dirs: RefCell<BTreeSet<String>>,
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    ops: RefCell<Vec<RemoteOp>>,
    failures: Vec<(&'static str, String)>,
    refuse_connect: bool,
    connected: bool,
}

fn parent(path: &str) -> String {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some(("", _)) | None => "/".to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}

fn is_within(path: &str, dir: &str) -> bool {
    path == dir || path.starts_with(&format!("{}/", dir))
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed existing directories, ancestors included.
    pub fn with_dirs(self, dirs: &[&str]) -> Self {
        for dir in dirs {
            self.create_all(dir);
        }
        self
    }

    /// Seed an existing file; its parent directories are created.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.create_all(&parent(path));
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    /// Make `op` ("exists", "mkdir", "rename", "put", "disconnect") fail on `path`.
    pub fn failing(mut self, op: &'static str, path: &str) -> Self {
        self.failures.push((op, path.to_string()));
        self
    }

    pub fn refusing_connections(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    pub fn ops(&self) -> Vec<RemoteOp> {
        self.ops.borrow().clone()
    }

    /// Mutating calls only (mkdir, rename, put)
    pub fn mutations(&self) -> Vec<RemoteOp> {
        self.ops
            .borrow()
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    RemoteOp::Mkdir { .. } | RemoteOp::Rename { .. } | RemoteOp::Put { .. }
                )
            })
            .cloned()
            .collect()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        path == "/" || self.dirs.borrow().contains(path)
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn create_all(&self, path: &str) {
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            self.dirs.borrow_mut().insert(current.clone());
        }
    }

    fn record(&self, op: RemoteOp) {
        self.ops.borrow_mut().push(op);
    }

    fn check(&self, op: &'static str, path: &str) -> RemoteResult<()> {
        if !self.connected {
            return Err(RemoteError::NotConnected);
        }
        if self.failures.iter().any(|(o, p)| *o == op && p == path) {
            return Err(RemoteError::operation(op, path, "injected failure"));
        }
        Ok(())
    }

    fn path_exists(&self, path: &str) -> bool {
        self.has_dir(path) || self.files.borrow().contains_key(path)
    }
}

impl RemoteFs for MockRemote {
    fn connect(&mut self, endpoint: &Endpoint) -> RemoteResult<()> {
        self.record(RemoteOp::Connect(endpoint.host.clone()));
        if self.refuse_connect {
            return Err(RemoteError::Connection {
                host: endpoint.host.clone(),
                port: endpoint.port,
                message: "connection refused".to_string(),
            });
        }
        self.connected = true;
        Ok(())
    }

    fn exists(&self, path: &str) -> RemoteResult<bool> {
        self.record(RemoteOp::Exists(path.to_string()));
        self.check("exists", path)?;
        Ok(self.path_exists(path))
    }

    fn mkdir(&self, path: &str, recursive: bool) -> RemoteResult<()> {
        self.record(RemoteOp::Mkdir {
            path: path.to_string(),
            recursive,
        });
        self.check("mkdir", path)?;
        if recursive {
            self.create_all(path);
            return Ok(());
        }
        if self.path_exists(path) {
            return Err(RemoteError::operation("mkdir", path, "already exists"));
        }
        if !self.has_dir(&parent(path)) {
            return Err(RemoteError::operation("mkdir", path, "no such parent"));
        }
        self.dirs.borrow_mut().insert(path.to_string());
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> RemoteResult<()> {
        self.record(RemoteOp::Rename {
            from: from.to_string(),
            to: to.to_string(),
        });
        self.check("rename", from)?;
        if !self.path_exists(from) {
            return Err(RemoteError::operation("rename", from, "no such file"));
        }
        if self.path_exists(to) {
            return Err(RemoteError::operation("rename", from, "destination exists"));
        }
        if !self.has_dir(&parent(to)) {
            return Err(RemoteError::operation("rename", from, "no such destination parent"));
        }

        let moved = |path: &str| format!("{}{}", to, &path[from.len()..]);
        let mut dirs = self.dirs.borrow_mut();
        let dir_moves: Vec<String> = dirs.iter().filter(|d| is_within(d, from)).cloned().collect();
        for dir in dir_moves {
            dirs.remove(&dir);
            dirs.insert(moved(&dir));
        }
        let mut files = self.files.borrow_mut();
        let file_moves: Vec<String> = files.keys().filter(|f| is_within(f, from)).cloned().collect();
        for file in file_moves {
            if let Some(content) = files.remove(&file) {
                files.insert(moved(&file), content);
            }
        }
        Ok(())
    }

    fn put(&self, local: &Path, remote: &str) -> RemoteResult<()> {
        self.record(RemoteOp::Put {
            local: local.to_path_buf(),
            remote: remote.to_string(),
        });
        self.check("put", remote)?;
        if !self.has_dir(&parent(remote)) {
            return Err(RemoteError::operation("put", remote, "no such parent"));
        }
        let content = fs::read(local).map_err(|source| RemoteError::LocalRead {
            path: local.to_path_buf(),
            source,
        })?;
        self.files.borrow_mut().insert(remote.to_string(), content);
        Ok(())
    }

    fn disconnect(&mut self) -> RemoteResult<()> {
        self.record(RemoteOp::Disconnect);
        let was_connected = self.connected;
        self.connected = false;
        if was_connected && self.failures.iter().any(|(op, _)| *op == "disconnect") {
            return Err(RemoteError::operation("disconnect", "", "injected failure"));
        }
        Ok(())
    }
}
