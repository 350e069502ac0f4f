//! Config file layer.
//!
//! Loaded from an explicit path, .ipc-timeout.yml, or ~/.config/ipc-timeout/config.yml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::{TimeoutOverrides, parse_timeout_ms};
use crate::error::{ConfigError, Result};

const READ_KEY: &str = "read-timeout-ms";
const SEND_KEY: &str = "send-timeout-ms";

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".ipc-timeout.yml";

/// Contents of an ipc-timeout config file.
///
/// Timeouts are kept as raw YAML values until [`FileConfig::overrides`] so that
/// negative numbers and quoted strings are validated the same way as the
/// environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Read timeout in milliseconds.
    #[serde(rename = "read-timeout-ms", skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<Value>,

    /// Send timeout in milliseconds.
    #[serde(rename = "send-timeout-ms", skip_serializing_if = "Option::is_none")]
    pub send_timeout_ms: Option<Value>,

    /// Default log filter when RUST_LOG is not set.
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// File this config was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl FileConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided (must exist)
    /// 2. .ipc-timeout.yml in current directory
    /// 3. ~/.config/ipc-timeout/config.yml
    /// 4. Empty (no file layer)
    ///
    /// Only a missing file is skipped. A file that exists but does not parse
    /// is an error wherever it was found.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()).into());
            }
            return Self::load_from_file(path);
        }

        let candidates = std::iter::once(PathBuf::from(PROJECT_CONFIG_FILE)).chain(Self::user_config_path());
        Self::load_first_existing(candidates)
    }

    /// Load the first candidate that exists, or the empty layer if none do.
    pub fn load_first_existing<I>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            return match Self::load_from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Ok(config)
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", path.display(), e);
                    Err(e)
                }
            };
        }

        log::debug!("No config file found, file layer is empty");
        Ok(Self::default())
    }

    /// Parse a config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_yaml(&content)?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Parse config file contents.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// User-level config location, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ipc-timeout").join("config.yml"))
    }

    /// Validate the timeout values and convert them into a layer.
    pub fn overrides(&self) -> std::result::Result<TimeoutOverrides, ConfigError> {
        Ok(TimeoutOverrides {
            read_timeout_ms: millis_from_value(READ_KEY, self.read_timeout_ms.as_ref())?,
            send_timeout_ms: millis_from_value(SEND_KEY, self.send_timeout_ms.as_ref())?,
        })
    }
}

fn millis_from_value(key: &str, value: Option<&Value>) -> std::result::Result<Option<u64>, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => parse_timeout_ms(key, &n.to_string()),
        Some(Value::String(s)) => parse_timeout_ms(key, s),
        Some(other) => Err(ConfigError::Unparsable {
            key: key.to_string(),
            value: serde_yaml::to_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|_| format!("{:?}", other)),
        }),
    }
}
