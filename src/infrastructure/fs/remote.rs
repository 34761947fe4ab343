//! SSH Remote Implementation
//!
//! Implements the RemoteFs port over SFTP: a russh session with the `sftp`
//! subsystem opened on one channel and driven through `russh-sftp`. A private
//! current-thread tokio runtime runs the connection so callers stay
//! synchronous.

use std::fmt::Display;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use russh::client::{self, Handle};
use russh::keys::PublicKey;
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Runtime;

use crate::domain::ports::remote_fs::{Endpoint, RemoteError, RemoteFs, RemoteResult};

/// Connection event handler
struct ClientHandler {
    host: String,
}

impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        tracing::debug!(
            "Host key of {}: {}",
            self.host,
            server_public_key.fingerprint(Default::default())
        );
        Ok(true)
    }
}

/// Open connection: the SSH session and the SFTP channel on top of it
struct Connection {
    runtime: Runtime,
    session: Handle<ClientHandler>,
    sftp: SftpSession,
}

/// Remote host reached over SFTP
///
/// Not connected until [`RemoteFs::connect`] succeeds.
#[derive(Default)]
pub struct SshRemote {
    connection: Option<Connection>,
    host: String,
}

/// Every directory from the top of `path` down to `path` itself
fn path_prefixes(path: &str) -> Vec<String> {
    let mut current = if path.starts_with('/') {
        String::from("/")
    } else {
        String::new()
    };
    let mut prefixes = Vec::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if !current.is_empty() && !current.ends_with('/') {
            current.push('/');
        }
        current.push_str(part);
        prefixes.push(current.clone());
    }
    prefixes
}

impl SshRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one SFTP request to completion.
    fn call<'a, F, T, E>(
        &'a self,
        op: &'static str,
        path: &str,
        request: impl FnOnce(&'a SftpSession) -> F,
    ) -> RemoteResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let Some(connection) = &self.connection else {
            return Err(RemoteError::NotConnected);
        };
        tracing::trace!("sftp {}: {} {}", self.host, op, path);
        connection
            .runtime
            .block_on(request(&connection.sftp))
            .map_err(|e| RemoteError::operation(op, path, e.to_string()))
    }
}

async fn open_sftp(session: &Handle<ClientHandler>) -> Result<SftpSession, String> {
    let channel = session
        .channel_open_session()
        .await
        .map_err(|e| e.to_string())?;
    channel
        .request_subsystem(true, "sftp")
        .await
        .map_err(|e| e.to_string())?;
    SftpSession::new(channel.into_stream())
        .await
        .map_err(|e| format!("sftp subsystem unavailable: {}", e))
}

impl RemoteFs for SshRemote {
    fn connect(&mut self, endpoint: &Endpoint) -> RemoteResult<()> {
        let connection_error = |message: String| RemoteError::Connection {
            host: endpoint.host.clone(),
            port: endpoint.port,
            message,
        };

        let user = endpoint
            .user
            .clone()
            .ok_or_else(|| RemoteError::Authentication {
                user: String::new(),
                host: endpoint.host.clone(),
            })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| connection_error(e.to_string()))?;

        let config = Arc::new(client::Config {
            inactivity_timeout: endpoint.timeout,
            ..Default::default()
        });
        let handler = ClientHandler {
            host: endpoint.host.clone(),
        };

        let (session, sftp) = runtime.block_on(async {
            let connecting = client::connect(config, (endpoint.host.as_str(), endpoint.port), handler);
            let connected = match endpoint.timeout {
                Some(limit) => tokio::time::timeout(limit, connecting)
                    .await
                    .map_err(|_| connection_error(format!("timed out after {:?}", limit)))?,
                None => connecting.await,
            };
            let mut session = connected.map_err(|e| connection_error(e.to_string()))?;

            let auth = match &endpoint.password {
                Some(password) => session.authenticate_password(user.clone(), password.clone()).await,
                None => session.authenticate_none(user.clone()).await,
            }
            .map_err(|e| connection_error(e.to_string()))?;

            if !auth.success() {
                return Err(RemoteError::Authentication {
                    user: user.clone(),
                    host: endpoint.host.clone(),
                });
            }

            let sftp = open_sftp(&session).await.map_err(connection_error)?;
            Ok((session, sftp))
        })?;

        self.host = endpoint.host.clone();
        self.connection = Some(Connection {
            runtime,
            session,
            sftp,
        });
        Ok(())
    }

    fn exists(&self, path: &str) -> RemoteResult<bool> {
        self.call("exists", path, |sftp| sftp.try_exists(path))
    }

    fn mkdir(&self, path: &str, recursive: bool) -> RemoteResult<()> {
        if !recursive {
            return self.call("mkdir", path, |sftp| sftp.create_dir(path));
        }
        for dir in path_prefixes(path) {
            if !self.exists(&dir)? {
                self.call("mkdir", &dir, |sftp| sftp.create_dir(dir.as_str()))?;
            }
        }
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> RemoteResult<()> {
        // servers may rename a directory over an empty one
        if self.exists(to)? {
            return Err(RemoteError::operation(
                "rename",
                from,
                format!("destination {} already exists", to),
            ));
        }
        self.call("rename", from, |sftp| sftp.rename(from, to))
    }

    fn put(&self, local: &Path, remote: &str) -> RemoteResult<()> {
        let Some(connection) = &self.connection else {
            return Err(RemoteError::NotConnected);
        };
        let mut file = connection
            .runtime
            .block_on(tokio::fs::File::open(local))
            .map_err(|source| RemoteError::LocalRead {
                path: local.to_path_buf(),
                source,
            })?;

        tracing::trace!("sftp {}: put {}", self.host, remote);
        connection
            .runtime
            .block_on(async {
                let mut target = connection
                    .sftp
                    .create(remote)
                    .await
                    .map_err(|e| e.to_string())?;
                tokio::io::copy(&mut file, &mut target)
                    .await
                    .map_err(|e| e.to_string())?;
                target.shutdown().await.map_err(|e| e.to_string())
            })
            .map_err(|message| RemoteError::operation("put", remote, message))
    }

    fn disconnect(&mut self) -> RemoteResult<()> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };
        let Connection {
            runtime,
            session,
            sftp,
        } = connection;
        let host = self.host.as_str();

        runtime.block_on(async {
            let closed = sftp
                .close()
                .await
                .map_err(|e| RemoteError::operation("disconnect", host, e.to_string()));
            session
                .disconnect(Disconnect::ByApplication, "", "English")
                .await
                .map_err(|e| RemoteError::operation("disconnect", host, e.to_string()))?;
            closed
        })
    }
}
