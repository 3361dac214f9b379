//! Generated gRPC protocol definitions for the MFT backend services.
//!
//! Two services are consumed by the gateway:
//! - `StorageCommonService` (storage directory: listing storages, resolving secrets)
//! - `MFTTransferService` (resource metadata queries and transfer submission)
pub mod storage_common {
    tonic::include_proto!("org.apache.airavata.mft.resource.stubs.storage.common");
}

pub mod transfer_api {
    tonic::include_proto!("org.apache.airavata.mft.api.service");
}

// Re-export the client/server modules for convenience
pub use storage_common::storage_common_service_client::StorageCommonServiceClient;
pub use storage_common::storage_common_service_server::{
    StorageCommonService, StorageCommonServiceServer,
};
pub use transfer_api::mft_transfer_service_client::MftTransferServiceClient;
pub use transfer_api::mft_transfer_service_server::{MftTransferService, MftTransferServiceServer};
