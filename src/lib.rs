//! ipc-timeout - Timeout-bounded read and send for IPC byte streams
//!
//! Wraps any tokio byte-stream endpoint with two fixed deadlines: a read
//! timeout (default 50 ms) and a send timeout (default 1000 ms), resolved once
//! from defaults, the build and runtime environment (`IPC_READ_TIMEOUT`,
//! `IPC_SEND_TIMEOUT`), a config file, and explicit overrides.

pub mod channel;
pub mod config;
pub mod error;

pub use channel::{MAX_READ_CHUNK, Outcome, TimeoutChannel, TransportError, read_within, send_within};
pub use config::{PolicyResolver, TimeoutOverrides, TimeoutPolicy};
pub use error::{ConfigError, IpcTimeoutError, Result};
