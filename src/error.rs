/*!
 * Error types for the gateway binary
 */

use mft_connect::ConnectError;
use mft_server::WebError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Process exit code for fatal errors
pub const EXIT_FATAL: i32 = 2;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed
    #[error("Invalid config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend endpoints could not be set up
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// HTTP server failed to start or stopped with an error
    #[error(transparent)]
    Server(#[from] WebError),
}

impl GatewayError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        EXIT_FATAL
    }
}
