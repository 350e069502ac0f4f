use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ipc_timeout::config::{FileConfig, PolicyResolver};
use ipc_timeout::{Outcome, TimeoutChannel};

mod cli;

use cli::Cli;
use cli::commands::Commands;

/// Exit code for a call that hit its deadline.
const EXIT_TIMED_OUT: u8 = 2;

fn setup_logging(default_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ipc-timeout")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("ipc-timeout.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let env = match default_level {
        Some(level) => env_logger::Env::default().default_filter_or(level.to_string()),
        None => env_logger::Env::default(),
    };

    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, resolver: &PolicyResolver) -> Result<ExitCode> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Policy { json } => handle_policy_command(resolver, *json),
        Commands::Read { socket, max_bytes } => handle_read_command(socket, *max_bytes, resolver).await,
        Commands::Send { socket, data } => handle_send_command(socket, data, resolver).await,
    }
}

fn handle_policy_command(resolver: &PolicyResolver, json: bool) -> Result<ExitCode> {
    let (read_ms, read_source) = resolver.read_timeout_ms();
    let (send_ms, send_source) = resolver.send_timeout_ms();
    info!("Resolved policy: read {} ms ({}), send {} ms ({})", read_ms, read_source, send_ms, send_source);

    if json {
        let report = serde_json::json!({
            "read_timeout_ms": { "value": read_ms, "source": read_source.to_string() },
            "send_timeout_ms": { "value": send_ms, "source": send_source.to_string() },
        });
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize policy")?);
    } else {
        println!("{} {} ms ({})", "Read timeout:".green(), read_ms, read_source);
        println!("{} {} ms ({})", "Send timeout:".green(), send_ms, send_source);
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_read_command(socket: &Path, max_bytes: usize, resolver: &PolicyResolver) -> Result<ExitCode> {
    info!("Reading up to {} bytes from {}", max_bytes, socket.display());
    let mut channel = TimeoutChannel::from_resolver(connect(socket).await?, resolver);

    let outcome = channel.read(max_bytes).await;
    Ok(report(outcome.map(|bytes| match String::from_utf8(bytes) {
        Ok(text) => format!("{} {}", "Received:".green(), text),
        Err(e) => format!("{} {}", "Received (hex):".green(), hex::encode(e.as_bytes())),
    })))
}

async fn handle_send_command(socket: &Path, data: &str, resolver: &PolicyResolver) -> Result<ExitCode> {
    info!("Sending {} bytes to {}", data.len(), socket.display());
    let mut channel = TimeoutChannel::from_resolver(connect(socket).await?, resolver);

    let outcome = channel.send(data.as_bytes()).await;
    Ok(report(outcome.map(|sent| format!("{} {} bytes", "Sent:".green(), sent))))
}

/// Print an outcome and pick the process exit code.
fn report(outcome: Outcome<String>) -> ExitCode {
    match outcome {
        Outcome::Completed(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Outcome::TimedOut { accepted } => {
            println!("{} {} bytes accepted", "Timed out:".yellow(), accepted);
            ExitCode::from(EXIT_TIMED_OUT)
        }
        Outcome::TransportError { accepted, error } => {
            eprintln!("{} {} ({} bytes accepted)", "Transport error:".red(), error, accepted);
            ExitCode::FAILURE
        }
    }
}

#[cfg(unix)]
async fn connect(socket: &Path) -> Result<tokio::net::UnixStream> {
    tokio::net::UnixStream::connect(socket)
        .await
        .with_context(|| format!("Failed to connect to {}", socket.display()))
}

#[cfg(not(unix))]
async fn connect(socket: &Path) -> Result<tokio::io::DuplexStream> {
    eyre::bail!("Unix sockets are not available on this platform: {}", socket.display())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load the config file first so its log level can seed the logger
    let file_config = FileConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    setup_logging(file_config.log_level.as_deref()).context("Failed to setup logging")?;

    match &file_config.source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using environment and defaults"),
    }

    // Bad timeout values fail here, before any channel exists
    let resolver =
        PolicyResolver::from_environment(&file_config, cli.overrides()).context("Invalid timeout configuration")?;

    // Run the main application logic
    run_application(&cli, &resolver).await.context("Application failed")
}
