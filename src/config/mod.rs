//! Timeout configuration.
//!
//! Layered resolution of the read and send timeouts, lowest precedence first:
//! 1. Compiled-in defaults (50 ms read, 1000 ms send)
//! 2. Build environment (`IPC_READ_TIMEOUT` / `IPC_SEND_TIMEOUT` at compile time)
//! 3. Config file (.ipc-timeout.yml or ~/.config/ipc-timeout/config.yml)
//! 4. Runtime environment (`IPC_READ_TIMEOUT` / `IPC_SEND_TIMEOUT`)
//! 5. Explicit overrides
//!
//! Every layer is validated when the [`PolicyResolver`] is built. Once built,
//! resolution cannot fail.

use crate::error::ConfigError;

pub use self::file::FileConfig;
pub use self::overrides::{TimeoutOverrides, TimeoutOverridesBuilder};
pub use self::policy::TimeoutPolicy;
pub use self::resolution::{ConfigSource, PolicyResolver};

mod file;
mod overrides;
mod policy;
mod resolution;

/// Default read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 50;

/// Default send timeout in milliseconds.
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 1000;

/// Environment variable overriding the read timeout.
pub const READ_TIMEOUT_ENV: &str = "IPC_READ_TIMEOUT";

/// Environment variable overriding the send timeout.
pub const SEND_TIMEOUT_ENV: &str = "IPC_SEND_TIMEOUT";

/// Parse a raw millisecond value from an environment variable or config file.
///
/// Surrounding whitespace is ignored and an empty value counts as unset.
/// Negative and non-integer values are rejected rather than clamped, so a typo
/// can never turn into "wait forever" or "never wait".
pub fn parse_timeout_ms(key: &str, raw: &str) -> Result<Option<u64>, ConfigError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<i128>() {
        Ok(ms) if ms < 0 => Err(ConfigError::Negative {
            key: key.to_string(),
            value: value.to_string(),
        }),
        Ok(ms) => u64::try_from(ms).map(Some).map_err(|_| ConfigError::Unparsable {
            key: key.to_string(),
            value: value.to_string(),
        }),
        Err(_) => Err(ConfigError::Unparsable {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_value() {
        assert_eq!(parse_timeout_ms("K", "250").unwrap(), Some(250));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_timeout_ms("K", "  75\n").unwrap(), Some(75));
    }

    #[test]
    fn test_parse_zero_is_a_value() {
        // Zero is "non-blocking", not "unset"
        assert_eq!(parse_timeout_ms("K", "0").unwrap(), Some(0));
    }

    #[test]
    fn test_parse_empty_is_unset() {
        assert_eq!(parse_timeout_ms("K", "").unwrap(), None);
        assert_eq!(parse_timeout_ms("K", "   ").unwrap(), None);
    }

    #[test]
    fn test_parse_negative_rejected() {
        let err = parse_timeout_ms("IPC_READ_TIMEOUT", "-1").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Negative {
                key: "IPC_READ_TIMEOUT".to_string(),
                value: "-1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_garbage_rejected() {
        for raw in ["fast", "1.5", "10ms", "-x", "0x10"] {
            let err = parse_timeout_ms("K", raw).unwrap_err();
            assert!(matches!(err, ConfigError::Unparsable { .. }), "{raw} should be unparsable");
        }
    }

    #[test]
    fn test_parse_overflow_rejected() {
        let err = parse_timeout_ms("K", "99999999999999999999999").unwrap_err();
        assert!(matches!(err, ConfigError::Unparsable { .. }));
    }
}
