//! RemoteFs port - abstraction over the remote host
//!
//! The deployment only needs a handful of primitives from the remote side.
//! Infrastructure provides the SSH implementation; tests use an in-memory one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote operation errors
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Could not reach or negotiate with the host
    #[error("cannot connect to {host}:{port}: {message}")]
    Connection {
        host: String,
        port: u16,
        message: String,
    },

    /// The host rejected the credentials
    #[error("authentication failed for user '{user}' on {host}")]
    Authentication { user: String, host: String },

    /// A primitive was called without an open connection
    #[error("not connected to the remote host")]
    NotConnected,

    /// A primitive failed on the remote side
    #[error("{op} failed on {path}: {message}")]
    Operation {
        op: &'static str,
        path: String,
        message: String,
    },

    /// The local file to transfer could not be read
    #[error("cannot read local file {}: {source}", path.display())]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RemoteError {
    pub fn operation(op: &'static str, path: &str, message: impl Into<String>) -> Self {
        Self::Operation {
            op,
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Where and how to connect
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Passed verbatim to the transport as its inactivity timeout
    pub timeout: Option<Duration>,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user {
            Some(user) => write!(f, "{}@{}:{}", user, self.host, self.port),
            None => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

/// Abstract remote host interface
///
/// Implementations:
/// - `SshRemote` - russh exec channels
/// - an in-memory recorder for tests
pub trait RemoteFs {
    /// Separator of the remote file system
    fn separator(&self) -> char {
        '/'
    }

    /// Open and authenticate the connection
    fn connect(&mut self, endpoint: &Endpoint) -> RemoteResult<()>;

    /// Check whether anything exists at `path`
    fn exists(&self, path: &str) -> RemoteResult<bool>;

    /// Create a directory, with its parents when `recursive` is set
    fn mkdir(&self, path: &str, recursive: bool) -> RemoteResult<()>;

    /// Move `from` to `to`. Fails if `to` already exists.
    fn rename(&self, from: &str, to: &str) -> RemoteResult<()>;

    /// Upload a local file, overwriting the remote one
    fn put(&self, local: &Path, remote: &str) -> RemoteResult<()>;

    /// Close the connection
    fn disconnect(&mut self) -> RemoteResult<()>;
}
