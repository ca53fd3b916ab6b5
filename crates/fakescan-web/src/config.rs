//! Server configuration.

use fakescan_core::{DetectError, DetectResult};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
/// Large enough for the >200 MB video rule to be reachable.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 512;

/// Settings for the HTTP service.
///
/// Every key is optional in the TOML file:
///
/// ```toml
/// host = "0.0.0.0"
/// port = 8080
/// max_upload_mb = 256
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: u64,
    /// Fixed seed for the score perturbation. Every request reuses it.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML configuration file.
    pub fn load(path: &Path) -> DetectResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
            .map_err(|e| DetectError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(text: &str) -> DetectResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| DetectError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DetectResult<()> {
        if self.host.trim().is_empty() {
            return Err(DetectError::config("host must not be empty"));
        }
        if self.port == 0 {
            return Err(DetectError::config("port must be greater than 0"));
        }
        if self.max_upload_mb == 0 {
            return Err(DetectError::config("max_upload_mb must be greater than 0"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }
}
