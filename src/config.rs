//! Configuration loading for `todoist-mcp.toml`.
//!
//! The config file is resolved from `TODOIST_MCP_CONFIG` when set, otherwise
//! `./todoist-mcp.toml`. A readable file with a non-empty `todoist.token` is
//! required — the process must not serve traffic without one, so every
//! failure here is fatal at startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

const CONFIG_FILENAME: &str = "todoist-mcp.toml";
const CONFIG_PATH_ENV: &str = "TODOIST_MCP_CONFIG";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_TODOIST_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Top-level configuration, constructed once at startup and passed by
/// reference into the gateway and the upstream client.
#[derive(Debug, Clone, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub todoist: TodoistConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Upstream Todoist API settings. The token has no default on purpose.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoistConfig {
    pub token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_base_url() -> String {
    DEFAULT_TODOIST_BASE_URL.to_string()
}

impl McpConfig {
    /// Load configuration from the resolved config path.
    pub fn load() -> ServiceResult<Self> {
        let path = resolve_config_path();
        Self::load_from(&path)
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> ServiceResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::config_error(format!(
                "cannot read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: McpConfig = toml::from_str(&contents).map_err(|e| {
            ServiceError::config_error(format!(
                "cannot parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> ServiceResult<()> {
        if self.todoist.token.trim().is_empty() {
            return Err(ServiceError::config_error(
                "todoist.token must not be empty",
            ));
        }
        Ok(())
    }
}

/// Resolve the config file path: env override first, then the working
/// directory.
fn resolve_config_path() -> PathBuf {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(CONFIG_FILENAME),
    }
}
