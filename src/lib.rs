/*!
 * MFT Gateway
 *
 * HTTP front door for the MFT storage services:
 * - Lists storages known to the storage directory
 * - Resolves storage secrets and fetches resource metadata
 * - Submits transfers and reports their state
 */

pub mod config;
pub mod error;
pub mod logging;

pub use config::{GatewayConfig, LogLevel};
pub use error::{GatewayError, Result};

use mft_connect::ServiceConnector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Connect the backend clients and serve HTTP until shutdown.
///
/// Must be called from within a tokio runtime. Logging is expected to be
/// initialized already.
pub async fn run(config: &GatewayConfig) -> Result<()> {
    config.validate()?;

    let services = ServiceConnector::connect_lazy(&config.service_endpoints())?;
    mft_server::run_server(config.server_config(), services).await?;

    Ok(())
}
