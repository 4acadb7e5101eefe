//! Configuration module for Gucker.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults. The watch and export
//! directories correspond to the folder selections the GUI used to persist.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration for Gucker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub watch: WatchConfig,
    pub export: ExportConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Folder-watching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Base directory to watch for new acquisitions. `None` until the
    /// user selects one; watching without it is a configuration error.
    pub base_dir: Option<PathBuf>,
    /// Seconds to sleep between scan cycles.
    pub poll_interval: u64,
    /// Default file-name pattern applied when the watch command does
    /// not pass one.
    pub pattern: Option<String>,
}

/// Export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination root for stage/dataset exports. `None` until the
    /// user selects one.
    pub destination: Option<PathBuf>,
}

/// Remote service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// GraphQL endpoint of the Mikro service.
    pub endpoint: String,
    /// Bearer token for authenticated requests. The auth handshake
    /// itself is outside Gucker; the token is provisioned externally.
    pub token: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/gucker/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("gucker")
            .join("config.yaml")
    }

    /// Poll interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.watch.poll_interval)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            poll_interval: 1,
            pattern: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/graphql".to_string(),
            token: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
