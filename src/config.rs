use crate::keymap::Keymap;
use crate::time_label::RelativeTimeConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Host of the public list service
pub const DEFAULT_HOST: &str = "https://completionlist.herokuapp.com";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the list service
    #[serde(default = "default_host")]
    pub host: String,
    /// UI theme: dark, light or nocolor
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Per-request timeout. Requests are unbounded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Keyboard bindings
    #[serde(default)]
    pub keymap: Keymap,
    /// Relative-time label tokens and thresholds
    #[serde(default)]
    pub relative_time: RelativeTimeConfig,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            theme: default_theme(),
            request_timeout_secs: None,
            keymap: Keymap::default(),
            relative_time: RelativeTimeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults if it doesn't exist
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            if config.host.trim().is_empty() {
                config.host = default_host();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file (owner read/write only on unix)
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
