//! Connection and run settings
//!
//! Settings come from an optional `.env` file in the local working directory,
//! overlaid by the process environment. Each key can be written with the
//! `UPSSH_` prefix or bare; the prefixed spelling wins.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::domain::ports::Endpoint;
use crate::error::ConfigError;

/// Default settings file name
pub const ENV_FILE: &str = ".env";

/// Prefix accepted in front of every key
pub const ENV_PREFIX: &str = "UPSSH_";

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

pub const SFTP_SERVER: &str = "SFTP_SERVER";
pub const SFTP_USER: &str = "SFTP_USER";
pub const SFTP_PASSWORD: &str = "SFTP_PASSWORD";
pub const SFTP_PORT: &str = "SFTP_PORT";
pub const SFTP_TIMEOUT: &str = "SFTP_TIMEOUT";
pub const TARGET_PATH: &str = "TARGET_PATH";
pub const BACKUP_PATH: &str = "BACKUP_PATH";

/// Raw key-value pairs
#[derive(Clone, Default)]
pub struct SettingsSource {
    values: HashMap<String, String>,
}

impl SettingsSource {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Read `env_file` (when present) then overlay the process environment.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let mut source = Self::default();

        if env_file.is_file() {
            let iter = dotenvy::from_path_iter(env_file).map_err(|e| {
                ConfigError::InvalidEnvFile {
                    path: env_file.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            for item in iter {
                let (key, value) = item.map_err(|e| ConfigError::InvalidEnvFile {
                    path: env_file.to_path_buf(),
                    message: e.to_string(),
                })?;
                source.values.insert(key, value);
            }
            tracing::debug!("Settings file loaded ({})", env_file.display());
        } else {
            tracing::warn!("The file ({}) was not found", env_file.display());
        }

        source.values.extend(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );
        Ok(source)
    }

    /// Look up `key` as `UPSSH_<key>`, then bare. Blank values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        let prefixed = format!("{}{}", ENV_PREFIX, key);
        let found = [prefixed.as_str(), key]
            .into_iter()
            .filter_map(|k| self.values.get(k))
            .map(|v| v.trim())
            .find(|v| !v.is_empty());
        found
    }
}

/// Typed settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: Endpoint,
    /// Single-target origin
    pub target_path: Option<String>,
    /// Backup root from the environment
    pub backup_path: Option<String>,
}

impl Settings {
    pub fn from_source(source: &SettingsSource) -> Result<Self, ConfigError> {
        let host = source
            .get(SFTP_SERVER)
            .ok_or(ConfigError::MissingServer)?
            .to_string();

        let port = match source.get(SFTP_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidSetting {
                key: SFTP_PORT,
                value: raw.to_string(),
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        tracing::info!("Remote host was set to {} on port {}", host, port);

        let timeout = source
            .get(SFTP_TIMEOUT)
            .map(|raw| {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::InvalidSetting {
                        key: SFTP_TIMEOUT,
                        value: raw.to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()?;

        let user = source.get(SFTP_USER).map(str::to_string);
        match &user {
            Some(user) => tracing::info!("Remote user was set to {}", user),
            None => tracing::warn!("The environment variable (UPSSH_SFTP_USER) is undefined"),
        }

        let password = source.get(SFTP_PASSWORD).map(str::to_string);
        if password.is_some() {
            tracing::info!("A password was found");
        } else {
            tracing::warn!("The environment variable (UPSSH_SFTP_PASSWORD) is undefined");
        }

        let backup_path = source.get(BACKUP_PATH).map(str::to_string);
        match &backup_path {
            Some(path) => tracing::info!(
                "A backup path was found in the environment variable (UPSSH_BACKUP_PATH): {}",
                path
            ),
            None => tracing::info!(
                "A backup path was not found in the environment variable (UPSSH_BACKUP_PATH)"
            ),
        }

        Ok(Self {
            endpoint: Endpoint {
                host,
                port,
                user,
                password,
                timeout,
            },
            target_path: source.get(TARGET_PATH).map(str::to_string),
            backup_path,
        })
    }
}
