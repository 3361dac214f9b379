//! MFT Core Interface: collaborator abstraction for the gateway
//!
//! The gateway talks to two backend services:
//!
//! 1. **Storage directory** (`StorageDirectory`): enumerates storages and
//!    resolves the secret needed to access a remote storage
//! 2. **Transfer service** (`TransferService`): answers resource metadata
//!    queries and accepts transfers
//!
//! Both are reached over gRPC in production (see `mft-connect`) and replaced
//! by in-memory fakes in tests (the `testing` module, enabled by the
//! `testing` feature).
//!
//! # Example
//!
//! ```rust,no_run
//! use mft_core_interface::{
//!     Collaborators, ResourceMetadataQuery, SecretReference, StorageKind, StorageReference,
//! };
//!
//! async fn lookup(services: &Collaborators) -> Result<(), mft_core_interface::UpstreamError> {
//!     let storage = StorageReference::new("local-1", StorageKind::Local, "/data");
//!     let query = ResourceMetadataQuery::new(&storage, &SecretReference::none());
//!     let metadata = services.transfer.resource_metadata(query).await?;
//!     println!("{:?}", metadata);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use types::{
    DirectoryMetadata, FileMetadata, ResourceMetadata, ResourceMetadataQuery, SecretReference,
    StorageEntry, StorageKind, StorageList, StorageReference, TransferOrder, TransferRequest,
    TransferState, TransferSubmission, LOCAL_STORAGE_TYPE,
};

/// gRPC status codes the gateway needs to reason about
pub mod code {
    pub const OK: i32 = 0;
    pub const CANCELLED: i32 = 1;
    pub const UNKNOWN: i32 = 2;
    pub const INVALID_ARGUMENT: i32 = 3;
    pub const DEADLINE_EXCEEDED: i32 = 4;
    pub const NOT_FOUND: i32 = 5;
    pub const PERMISSION_DENIED: i32 = 7;
    pub const INTERNAL: i32 = 13;
    pub const UNAVAILABLE: i32 = 14;
    pub const UNAUTHENTICATED: i32 = 16;
}

/// The single failure kind of the gateway: an upstream call failed.
///
/// Network failures, backend-reported errors and malformed responses all end
/// up here. The serialized form mirrors a gRPC status: `code`, `details` and
/// the ASCII trailing `metadata`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("upstream call failed (code {code}): {details}")]
pub struct UpstreamError {
    pub code: i32,
    pub details: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl UpstreamError {
    pub fn new(code: i32, details: impl Into<String>) -> Self {
        Self {
            code,
            details: details.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Backend could not be reached at all
    pub fn unavailable(details: impl Into<String>) -> Self {
        Self::new(code::UNAVAILABLE, details)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// The storage directory service
///
/// Implementations must be `Send + Sync + 'static` to be shared across handlers.
#[async_trait]
pub trait StorageDirectory: Send + Sync + 'static {
    /// List all storages (empty filter)
    async fn list_storages(&self) -> Result<StorageList>;

    /// Resolve the secret registered for a storage
    async fn secret_for_storage(&self, storage_id: &str) -> Result<SecretReference>;
}

/// The metadata / transfer service
#[async_trait]
pub trait TransferService: Send + Sync + 'static {
    /// Describe what lives at a path inside a storage
    async fn resource_metadata(&self, query: ResourceMetadataQuery) -> Result<ResourceMetadata>;

    /// Submit a transfer between two storages
    async fn submit_transfer(&self, order: TransferOrder) -> Result<TransferSubmission>;

    /// Latest state of a submitted transfer
    async fn transfer_state(&self, transfer_id: &str) -> Result<TransferState>;
}

/// Process-wide handle to the backend services.
///
/// Built once at startup and passed explicitly to every gateway operation.
/// Cloning is cheap.
#[derive(Clone)]
pub struct Collaborators {
    pub directory: Arc<dyn StorageDirectory>,
    pub transfer: Arc<dyn TransferService>,
}

impl Collaborators {
    pub fn new(directory: Arc<dyn StorageDirectory>, transfer: Arc<dyn TransferService>) -> Self {
        Self {
            directory,
            transfer,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
