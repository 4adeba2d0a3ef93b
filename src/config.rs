use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::ConnectionSettings;

/// Names the YAML file to load, if any.
pub const CONFIG_ENV: &str = "DOCROOT_CONFIG";
/// Overrides `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";
/// Overrides `static_files.root`.
pub const ROOT_ENV: &str = "DOCROOT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Connections handled at once; further clients wait in the backlog
    pub max_connections: usize,
    pub max_request_bytes: usize,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            max_connections: 256,
            max_request_bytes: 1024 * 1024,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            max_request_bytes: self.max_request_bytes,
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            write_timeout: Duration::from_secs(self.write_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Document root; request targets resolve below it
    pub root: PathBuf,
    /// Page served with every 404, relative to `root`
    pub not_found_page: String,
    pub max_file_bytes: u64,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            not_found_page: "404.html".to_string(),
            max_file_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Loads the YAML file named by `DOCROOT_CONFIG` (or defaults), then
    /// applies `LISTEN` and `DOCROOT` from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&raw).with_context(|| format!("parsing config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        // An empty document means "all defaults".
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies overrides from `lookup`, which is `std::env::var` outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup(LISTEN_ENV) {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup(ROOT_ENV) {
            self.static_files.root = PathBuf::from(root);
        }
    }
}
