//! CLI module for ipc-timeout - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for inspecting the resolved
//! timeout policy and performing single bounded reads and sends.

pub mod commands;

pub use commands::Cli;
