/*!
 * MFT Gateway - HTTP server entry point
 */

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mft_gateway::{config::LogLevel, logging, GatewayConfig};
use mft_server::UpstreamErrorMode;
use std::path::PathBuf;
use tracing::{error, info};

/// HTTP gateway for the MFT storage directory and transfer services
#[derive(Parser, Debug)]
#[command(name = "mft-gateway")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; flags below override its values
    #[arg(short, long, env = "MFT_GATEWAY_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long, env = "MFT_GATEWAY_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MFT_GATEWAY_PORT")]
    port: Option<u16>,

    /// Storage directory service address
    #[arg(long, env = "MFT_DIRECTORY_ENDPOINT", value_name = "URI")]
    directory_endpoint: Option<String>,

    /// Metadata / transfer service address
    #[arg(long, env = "MFT_TRANSFER_ENDPOINT", value_name = "URI")]
    transfer_endpoint: Option<String>,

    /// Allowed browser origin (can be specified multiple times)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    allowed_origins: Vec<String>,

    /// How backend errors are reported to HTTP callers
    #[arg(long, value_enum)]
    upstream_errors: Option<ErrorModeArg>,

    /// Per-call backend deadline in seconds (0 = none)
    #[arg(long, value_name = "SECS")]
    request_timeout: Option<u64>,

    /// Log file path (JSON lines); stdout when unset
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevelArg>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ErrorModeArg {
    /// HTTP 200 with the error body
    Passthrough,
    /// HTTP status derived from the gRPC code
    Mapped,
}

impl From<ErrorModeArg> for UpstreamErrorMode {
    fn from(arg: ErrorModeArg) -> Self {
        match arg {
            ErrorModeArg::Passthrough => UpstreamErrorMode::Passthrough,
            ErrorModeArg::Mapped => UpstreamErrorMode::Mapped,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides
    fn into_config(self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GatewayConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(endpoint) = self.directory_endpoint {
            config.directory_endpoint = endpoint;
        }
        if let Some(endpoint) = self.transfer_endpoint {
            config.transfer_endpoint = endpoint;
        }
        if !self.allowed_origins.is_empty() {
            config.allowed_origins = self.allowed_origins;
        }
        if let Some(mode) = self.upstream_errors {
            config.upstream_errors = mode.into();
        }
        if let Some(secs) = self.request_timeout {
            config.request_timeout_secs = secs;
        }
        if let Some(path) = self.log_file {
            config.log_file = Some(path);
        }
        if let Some(level) = self.log_level {
            config.log_level = level.into();
        }
        config.verbose |= self.verbose;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config).context("Failed to initialize logging")?;
    info!("MFT Gateway v{}", mft_gateway::VERSION);

    if let Err(e) = mft_gateway::run(&config).await {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
