//! Timeout overrides for a single configuration layer.
//!
//! Each layer (build, file, environment, explicit) contributes an optional
//! read and send timeout. Values here are already validated milliseconds.

use serde::{Deserialize, Serialize};

use super::{READ_TIMEOUT_ENV, SEND_TIMEOUT_ENV, parse_timeout_ms};
use crate::error::ConfigError;

/// Optional read/send timeouts contributed by one layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeoutOverrides {
    /// Override read timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,

    /// Override send timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_timeout_ms: Option<u64>,
}

impl TimeoutOverrides {
    /// Create empty overrides (no overrides applied).
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any overrides are set.
    pub fn is_empty(&self) -> bool {
        self.read_timeout_ms.is_none() && self.send_timeout_ms.is_none()
    }

    /// Create overrides with just the read timeout.
    pub fn with_read_timeout_ms(ms: u64) -> Self {
        Self {
            read_timeout_ms: Some(ms),
            ..Default::default()
        }
    }

    /// Create overrides with just the send timeout.
    pub fn with_send_timeout_ms(ms: u64) -> Self {
        Self {
            send_timeout_ms: Some(ms),
            ..Default::default()
        }
    }

    /// Read overrides from `IPC_READ_TIMEOUT` / `IPC_SEND_TIMEOUT` through `lookup`.
    ///
    /// `lookup` returns the raw value of a variable, or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_timeout_ms = match lookup(READ_TIMEOUT_ENV) {
            Some(raw) => parse_timeout_ms(READ_TIMEOUT_ENV, &raw)?,
            None => None,
        };
        let send_timeout_ms = match lookup(SEND_TIMEOUT_ENV) {
            Some(raw) => parse_timeout_ms(SEND_TIMEOUT_ENV, &raw)?,
            None => None,
        };
        Ok(Self {
            read_timeout_ms,
            send_timeout_ms,
        })
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides baked in at compile time.
    pub fn from_build() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            READ_TIMEOUT_ENV => option_env!("IPC_READ_TIMEOUT").map(str::to_string),
            SEND_TIMEOUT_ENV => option_env!("IPC_SEND_TIMEOUT").map(str::to_string),
            _ => None,
        })
    }
}

/// Builder for TimeoutOverrides.
#[derive(Debug, Default)]
pub struct TimeoutOverridesBuilder {
    overrides: TimeoutOverrides,
}

impl TimeoutOverridesBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set read timeout override.
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.overrides.read_timeout_ms = Some(ms);
        self
    }

    /// Set send timeout override.
    pub fn send_timeout_ms(mut self, ms: u64) -> Self {
        self.overrides.send_timeout_ms = Some(ms);
        self
    }

    /// Build the TimeoutOverrides.
    pub fn build(self) -> TimeoutOverrides {
        self.overrides
    }
}
