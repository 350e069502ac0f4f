//! Timeout resolution (layered merge).
//!
//! Resolves the effective TimeoutPolicy from, lowest precedence first:
//! 1. Compiled-in defaults
//! 2. Build environment
//! 3. Config file
//! 4. Runtime environment
//! 5. Explicit overrides

use std::time::Duration;

use super::{DEFAULT_READ_TIMEOUT_MS, DEFAULT_SEND_TIMEOUT_MS, FileConfig, TimeoutOverrides, TimeoutPolicy};
use crate::error::ConfigError;

/// Resolver holding every validated layer.
///
/// Construction is the only fallible step; an invalid value in any layer is
/// reported there, so resolving a timeout afterwards always succeeds.
#[derive(Debug, Clone, Default)]
pub struct PolicyResolver {
    build: TimeoutOverrides,
    file: TimeoutOverrides,
    environment: TimeoutOverrides,
    overrides: TimeoutOverrides,
}

impl PolicyResolver {
    /// Create a resolver with no layers beyond the compiled-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from the build environment, `file`, the process
    /// environment, and explicit `overrides`.
    pub fn from_environment(file: &FileConfig, overrides: TimeoutOverrides) -> Result<Self, ConfigError> {
        let resolver = Self::new()
            .with_build(TimeoutOverrides::from_build()?)
            .with_file(file.overrides()?)
            .with_environment(TimeoutOverrides::from_env()?)
            .with_overrides(overrides);
        log::debug!("Timeout layers: {:?}", resolver);
        Ok(resolver)
    }

    /// Set the build-time layer.
    pub fn with_build(mut self, layer: TimeoutOverrides) -> Self {
        self.build = layer;
        self
    }

    /// Set the config file layer.
    pub fn with_file(mut self, layer: TimeoutOverrides) -> Self {
        self.file = layer;
        self
    }

    /// Set the runtime environment layer.
    pub fn with_environment(mut self, layer: TimeoutOverrides) -> Self {
        self.environment = layer;
        self
    }

    /// Set the explicit override layer.
    pub fn with_overrides(mut self, layer: TimeoutOverrides) -> Self {
        self.overrides = layer;
        self
    }

    /// Effective read timeout: the highest-precedence layer that sets it, else 50 ms.
    pub fn resolve_read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms().0)
    }

    /// Effective send timeout: the highest-precedence layer that sets it, else 1000 ms.
    pub fn resolve_send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms().0)
    }

    /// Effective read timeout in milliseconds and the layer it came from.
    pub fn read_timeout_ms(&self) -> (u64, ConfigSource) {
        self.pick(|layer| layer.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS)
    }

    /// Effective send timeout in milliseconds and the layer it came from.
    pub fn send_timeout_ms(&self) -> (u64, ConfigSource) {
        self.pick(|layer| layer.send_timeout_ms, DEFAULT_SEND_TIMEOUT_MS)
    }

    /// Resolve both timeouts into a policy.
    pub fn resolve(&self) -> TimeoutPolicy {
        TimeoutPolicy::new(self.resolve_read_timeout(), self.resolve_send_timeout())
    }

    fn pick(&self, field: impl Fn(&TimeoutOverrides) -> Option<u64>, default: u64) -> (u64, ConfigSource) {
        let layers = [
            (ConfigSource::Override, &self.overrides),
            (ConfigSource::Environment, &self.environment),
            (ConfigSource::File, &self.file),
            (ConfigSource::Build, &self.build),
        ];
        layers
            .into_iter()
            .find_map(|(source, layer)| field(layer).map(|ms| (ms, source)))
            .unwrap_or((default, ConfigSource::Default))
    }
}

/// Source tracking for configuration values (for introspection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in default value.
    Default,
    /// Captured from the build environment.
    Build,
    /// From a config file.
    File,
    /// From the runtime environment.
    Environment,
    /// From an explicit override.
    Override,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::Build => write!(f, "build"),
            ConfigSource::File => write!(f, "config file"),
            ConfigSource::Environment => write!(f, "environment"),
            ConfigSource::Override => write!(f, "override"),
        }
    }
}
