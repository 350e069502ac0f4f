//! Configuration layering integration tests
//!
//! Builds resolvers from real config files and simulated environments.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use ipc_timeout::config::{ConfigSource, FileConfig, PolicyResolver, TimeoutOverrides};
use ipc_timeout::error::{ConfigError, Result};
use tempfile::NamedTempFile;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_file_then_environment_then_override() -> Result<()> {
    let file = write_config("read-timeout-ms: 80\nsend-timeout-ms: 800\n");
    let config = FileConfig::load(Some(file.path()))?;

    let resolver = PolicyResolver::new()
        .with_file(config.overrides()?)
        .with_environment(TimeoutOverrides::from_lookup(env(&[("IPC_SEND_TIMEOUT", "900")]))?)
        .with_overrides(TimeoutOverrides::with_read_timeout_ms(5));

    assert_eq!(resolver.read_timeout_ms(), (5, ConfigSource::Override));
    assert_eq!(resolver.send_timeout_ms(), (900, ConfigSource::Environment));

    let policy = resolver.resolve();
    assert_eq!(policy.read_timeout(), Duration::from_millis(5));
    assert_eq!(policy.send_timeout(), Duration::from_millis(900));
    Ok(())
}

#[test]
fn test_file_only_fills_what_it_sets() -> Result<()> {
    let file = write_config("send-timeout-ms: 0\n");
    let config = FileConfig::load(Some(file.path()))?;
    let resolver = PolicyResolver::new().with_file(config.overrides()?);

    assert_eq!(resolver.resolve_read_timeout(), Duration::from_millis(50));
    assert_eq!(resolver.resolve_send_timeout(), Duration::ZERO);
    Ok(())
}

#[test]
fn test_bad_environment_fails_before_any_channel() {
    for (raw, negative) in [("-20", true), ("twenty", false), ("20.0", false)] {
        let err = TimeoutOverrides::from_lookup(env(&[("IPC_READ_TIMEOUT", raw)])).unwrap_err();
        match err {
            ConfigError::Negative { .. } => assert!(negative, "{raw}"),
            ConfigError::Unparsable { .. } => assert!(!negative, "{raw}"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn test_bad_file_value_fails_resolver_construction() {
    let file = write_config("read-timeout-ms: -50\n");
    let config = FileConfig::load(Some(file.path())).unwrap();

    let err = PolicyResolver::from_environment(&config, TimeoutOverrides::none()).unwrap_err();
    assert!(matches!(err, ConfigError::Negative { ref key, .. } if key == "read-timeout-ms"));
}

#[test]
fn test_log_level_is_carried() -> Result<()> {
    let file = write_config("log-level: trace\n");
    let config = FileConfig::load(Some(file.path()))?;
    assert_eq!(config.log_level.as_deref(), Some("trace"));
    assert!(config.overrides()?.is_empty());
    Ok(())
}
