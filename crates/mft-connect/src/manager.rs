//! ServiceConnector: builds the gateway's collaborator handle from endpoints

use crate::directory::GrpcDirectory;
use crate::error::ConnectError;
use crate::transfer::GrpcTransfer;
use mft_core_interface::Collaborators;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info};

/// Addresses of the backend services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    /// Storage directory service (e.g., "http://localhost:7003")
    pub directory: String,

    /// Metadata / transfer service
    pub transfer: String,

    /// Per-call deadline; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl ServiceEndpoints {
    pub fn new(directory: impl Into<String>, transfer: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            transfer: transfer.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Builds the process-wide `Collaborators` handle.
///
/// Channels are lazy: nothing is dialed until the first call, so the gateway
/// starts even while the backend is down. A failed connection surfaces as an
/// `UNAVAILABLE` upstream error on the request that triggered it.
///
/// # Example
///
/// ```rust,no_run
/// use mft_connect::{ServiceConnector, ServiceEndpoints};
///
/// # async fn example() -> Result<(), mft_connect::ConnectError> {
/// let endpoints = ServiceEndpoints::new("http://10.0.0.5:7003", "http://10.0.0.5:7004");
/// let services = ServiceConnector::connect_lazy(&endpoints)?;
/// # let _ = services;
/// # Ok(())
/// # }
/// ```
pub struct ServiceConnector;

impl ServiceConnector {
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(endpoints: &ServiceEndpoints) -> Result<Collaborators, ConnectError> {
        let directory_channel = Self::channel(&endpoints.directory, endpoints.request_timeout)?;

        // Both services commonly live behind one port; share the channel then
        let transfer_channel = if endpoints.transfer == endpoints.directory {
            debug!(
                "Directory and transfer services share {}",
                endpoints.directory
            );
            directory_channel.clone()
        } else {
            Self::channel(&endpoints.transfer, endpoints.request_timeout)?
        };

        info!(
            "Backend services: directory={} transfer={}",
            endpoints.directory, endpoints.transfer
        );

        Ok(Collaborators::new(
            Arc::new(GrpcDirectory::new(directory_channel)),
            Arc::new(GrpcTransfer::new(transfer_channel)),
        ))
    }

    fn channel(address: &str, timeout: Option<Duration>) -> Result<Channel, ConnectError> {
        let mut endpoint = Endpoint::from_shared(address.to_string()).map_err(|e| {
            ConnectError::InvalidEndpoint {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })?;

        if let Some(timeout) = timeout {
            endpoint = endpoint.timeout(timeout);
        }

        Ok(endpoint.connect_lazy())
    }
}
