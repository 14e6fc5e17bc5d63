use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::put_status::ERROR_BODY_TRUNCATE_LEN;

/// HTTP method the URL-info collaborator uses to probe a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    #[default]
    Head,
    Get,
}

/// Handler configuration loaded from `~/.config/urlwise/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Method used when fetching URL info: "head" (default) or "get".
    #[serde(default)]
    pub request_method: RequestMethod,
    /// Maximum bytes of an error body quoted in PUT failure messages.
    #[serde(default = "default_error_body_limit")]
    pub error_body_limit: usize,
    /// Timeout in seconds for URL-info lookups made without an explicit one (None = collaborator default).
    #[serde(default)]
    pub default_timeout_secs: Option<u64>,
}

fn default_error_body_limit() -> usize {
    ERROR_BODY_TRUNCATE_LEN
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            request_method: RequestMethod::Head,
            error_body_limit: ERROR_BODY_TRUNCATE_LEN,
            default_timeout_secs: None,
        }
    }
}

impl HandlerConfig {
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlwise")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HandlerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HandlerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<HandlerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: HandlerConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
