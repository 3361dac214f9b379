//! MFT Connect: gRPC connectivity to the MFT backend services
//!
//! This crate provides the production implementations of the collaborator
//! traits defined in `mft-core-interface`.
//!
//! # Architecture
//!
//! - **GrpcDirectory**: `StorageDirectory` backed by `StorageCommonService`
//! - **GrpcTransfer**: `TransferService` backed by `MFTTransferService`
//! - **ServiceConnector**: builds the process-wide `Collaborators` handle
//!
//! # Example
//!
//! ```rust,no_run
//! use mft_connect::{ServiceConnector, ServiceEndpoints};
//!
//! # async fn example() -> Result<(), mft_connect::ConnectError> {
//! let endpoints = ServiceEndpoints::new("http://localhost:7003", "http://localhost:7003");
//! let services = ServiceConnector::connect_lazy(&endpoints)?;
//! let storages = services.directory.list_storages().await;
//! # let _ = storages;
//! # Ok(())
//! # }
//! ```

mod convert;
pub mod directory;
pub mod error;
pub mod manager;
pub mod transfer;

pub use directory::GrpcDirectory;
pub use error::{upstream_error, ConnectError};
pub use manager::{ServiceConnector, ServiceEndpoints};
pub use transfer::GrpcTransfer;
