//! Server configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level sikho server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind (0 picks a free port).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the four dataset files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Persona used when a request does not name one.
    #[serde(default = "default_persona")]
    pub default_persona: String,
    /// Dialect used when a request does not name one.
    #[serde(default = "default_dialect")]
    pub default_dialect: String,
    /// Largest request body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_persona() -> String {
    "farmer".to_string()
}
fn default_dialect() -> String {
    "bhojpuri".to_string()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            default_persona: default_persona(),
            default_dialect: default_dialect(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Without a path the search order is:
/// 1. `sikho.toml` in the current directory
/// 2. `~/.config/sikho/config.toml`
///
/// Environment variable overrides: `SIKHO_HOST`, `SIKHO_PORT`, `SIKHO_DATA_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("sikho.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ServerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    Ok(config)
}

/// Apply `SIKHO_*` overrides, reading variables through `lookup`.
pub fn apply_env_overrides(
    config: &mut ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(host) = lookup("SIKHO_HOST") {
        config.host = host;
    }
    if let Some(port) = lookup("SIKHO_PORT") {
        config.port = port
            .trim()
            .parse()
            .with_context(|| format!("invalid SIKHO_PORT: {port}"))?;
    }
    if let Some(dir) = lookup("SIKHO_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sikho"))
}
