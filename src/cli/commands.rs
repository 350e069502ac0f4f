//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - policy: show the resolved timeouts and where they came from
//! - read: one bounded read from a Unix socket
//! - send: one bounded send to a Unix socket

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ipc_timeout::TimeoutOverrides;

/// ipc-timeout - Timeout-bounded IPC reads and sends
#[derive(Parser, Debug)]
#[command(name = "ipc-timeout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read timeout in milliseconds (overrides file and environment)
    #[arg(long, global = true, value_name = "MS")]
    pub read_timeout_ms: Option<u64>,

    /// Send timeout in milliseconds (overrides file and environment)
    #[arg(long, global = true, value_name = "MS")]
    pub send_timeout_ms: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Timeouts given on the command line
    pub fn overrides(&self) -> TimeoutOverrides {
        TimeoutOverrides {
            read_timeout_ms: self.read_timeout_ms,
            send_timeout_ms: self.send_timeout_ms,
        }
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved read and send timeouts
    Policy {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read once from a Unix socket
    Read {
        /// Socket to connect to
        #[arg(short, long)]
        socket: PathBuf,

        /// Maximum bytes to read
        #[arg(short, long, default_value_t = 4096)]
        max_bytes: usize,
    },

    /// Send once to a Unix socket
    Send {
        /// Socket to connect to
        #[arg(short, long)]
        socket: PathBuf,

        /// Data to send
        data: String,
    },
}
