/*!
 * Configuration types for the MFT gateway
 */

use crate::error::{GatewayError, Result};
use mft_connect::ServiceEndpoints;
use mft_server::{ServerConfig, UpstreamErrorMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for the gateway process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Storage directory service address
    #[serde(default = "default_backend")]
    pub directory_endpoint: String,

    /// Metadata / transfer service address
    #[serde(default = "default_backend")]
    pub transfer_endpoint: String,

    /// Origins allowed to call the API from a browser
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// How backend errors are reported to HTTP callers
    #[serde(default)]
    pub upstream_errors: UpstreamErrorMode,

    /// Per-call deadline on backend requests in seconds (0 = none)
    #[serde(default)]
    pub request_timeout_secs: u64,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stdout)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            directory_endpoint: default_backend(),
            transfer_endpoint: default_backend(),
            allowed_origins: default_allowed_origins(),
            upstream_errors: UpstreamErrorMode::default(),
            request_timeout_secs: 0,
            log_level: LogLevel::Info,
            log_file: None,
            verbose: false,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5500
}

fn default_backend() -> String {
    "http://localhost:7003".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| GatewayError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(GatewayError::Config("port must not be 0".to_string()));
        }
        if self.directory_endpoint.is_empty() || self.transfer_endpoint.is_empty() {
            return Err(GatewayError::Config(
                "backend endpoints must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            allowed_origins: self.allowed_origins.clone(),
            upstream_errors: self.upstream_errors,
        }
    }

    pub fn service_endpoints(&self) -> ServiceEndpoints {
        let endpoints = ServiceEndpoints::new(&self.directory_endpoint, &self.transfer_endpoint);
        match self.request_timeout_secs {
            0 => endpoints,
            secs => endpoints.with_timeout(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_deployment() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 5500);
        assert_eq!(config.directory_endpoint, "http://localhost:7003");
        assert_eq!(config.transfer_endpoint, "http://localhost:7003");
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.upstream_errors, UpstreamErrorMode::Passthrough);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
port = 8080
directory_endpoint = "http://directory:7003"
transfer_endpoint = "http://agent:7004"
allowed_origins = ["https://mft.example.org", "http://localhost:3000"]
upstream_errors = "mapped"
request_timeout_secs = 15
log_level = "debug"
"#
        )
        .unwrap();

        let config = GatewayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.upstream_errors, UpstreamErrorMode::Mapped);
        assert_eq!(config.log_level, LogLevel::Debug);

        let endpoints = config.service_endpoints();
        assert_eq!(endpoints.directory, "http://directory:7003");
        assert_eq!(endpoints.transfer, "http://agent:7004");
        assert_eq!(endpoints.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = GatewayConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigFile { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/mft-gateway.toml");
        let err = GatewayConfig::from_file(path).unwrap_err();
        assert!(matches!(err, GatewayError::Io(_)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = GatewayConfig::default();
        assert_eq!(config.service_endpoints().request_timeout, None);
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let config = GatewayConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_server_config_conversion() {
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            upstream_errors: UpstreamErrorMode::Mapped,
            ..Default::default()
        };
        let server = config.server_config();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 5500);
        assert_eq!(server.upstream_errors, UpstreamErrorMode::Mapped);
    }
}
