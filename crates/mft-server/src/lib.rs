//! MFT Server - HTTP surface of the gateway
//!
//! Exposes REST endpoints that resolve storage secrets and forward metadata
//! and transfer requests to the backend gRPC services.
//! Built with Axum; cross-origin access is limited to an allow-list.

pub mod api;
pub mod cors;
pub mod error;
pub mod gateway;
pub mod server;
pub mod state;

pub use cors::OriginPolicy;
pub use error::{UpstreamErrorMode, WebError, WebResult};
pub use server::{router, run_server};
pub use state::AppState;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API cross-origin
    pub allowed_origins: Vec<String>,
    pub upstream_errors: UpstreamErrorMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5500,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            upstream_errors: UpstreamErrorMode::Passthrough,
        }
    }
}
