//! Error types for ipc-timeout
//!
//! Centralized error handling using thiserror. Transport failures that happen
//! during a read or send are not errors of this kind: they are reported inside
//! the operation outcome (see [`crate::channel::TransportError`]).

use std::path::PathBuf;

use thiserror::Error;

/// A timeout override that could not be accepted.
///
/// Raised while the policy resolver is built, never while a channel is in use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The value is a negative number of milliseconds.
    #[error("{key} must not be negative, got {value:?}")]
    Negative { key: String, value: String },

    /// The value is not an integer number of milliseconds.
    #[error("{key} is not an integer number of milliseconds: {value:?}")]
    Unparsable { key: String, value: String },

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    Missing(PathBuf),
}

/// All error types that can occur outside of a channel operation
#[derive(Debug, Error)]
pub enum IpcTimeoutError {
    /// Invalid timeout configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML config parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for ipc-timeout operations
pub type Result<T> = std::result::Result<T, IpcTimeoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_error() {
        let err = ConfigError::Negative {
            key: "IPC_READ_TIMEOUT".to_string(),
            value: "-5".to_string(),
        };
        assert_eq!(err.to_string(), "IPC_READ_TIMEOUT must not be negative, got \"-5\"");
    }

    #[test]
    fn test_unparsable_error() {
        let err = ConfigError::Unparsable {
            key: "IPC_SEND_TIMEOUT".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "IPC_SEND_TIMEOUT is not an integer number of milliseconds: \"soon\""
        );
    }

    #[test]
    fn test_missing_error() {
        let err = ConfigError::Missing(PathBuf::from("/etc/ipc.yml"));
        assert_eq!(err.to_string(), "Config file not found: /etc/ipc.yml");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: IpcTimeoutError = ConfigError::Missing(PathBuf::from("x.yml")).into();
        assert!(matches!(err, IpcTimeoutError::Config(_)));
        assert!(err.to_string().starts_with("Config error:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: IpcTimeoutError = io_err.into();
        assert!(matches!(err, IpcTimeoutError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<u64>("[not, a, number]").unwrap_err();
        let err: IpcTimeoutError = yaml_err.into();
        assert!(matches!(err, IpcTimeoutError::Yaml(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<u64> {
            Ok(50)
        }

        fn returns_err() -> Result<u64> {
            Err(ConfigError::Missing(PathBuf::from("gone.yml")).into())
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
