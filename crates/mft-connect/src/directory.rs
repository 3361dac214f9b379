//! GrpcDirectory: StorageDirectory implementation backed by StorageCommonService

use async_trait::async_trait;
use mft_core_interface::{Result, SecretReference, StorageDirectory, StorageList};
use mft_proto::storage_common::{
    Error as SecretError, SecretForStorageGetRequest, StorageListRequest,
};
use mft_proto::StorageCommonServiceClient;
use tonic::transport::Channel;
use tracing::{debug, warn};

use crate::convert;
use crate::error::upstream_error;

/// Storage directory reached over gRPC.
///
/// This struct is cheaply cloneable (tonic's Channel is internally shared).
#[derive(Clone)]
pub struct GrpcDirectory {
    client: StorageCommonServiceClient<Channel>,
}

impl GrpcDirectory {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: StorageCommonServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl StorageDirectory for GrpcDirectory {
    async fn list_storages(&self) -> Result<StorageList> {
        debug!("Listing storages");

        let response = self
            .client
            .clone()
            .list_storages(StorageListRequest::default())
            .await
            .map_err(upstream_error)?;

        let list = convert::storage_list(response.into_inner());
        debug!("Directory returned {} storages", list.storages.len());
        Ok(list)
    }

    async fn secret_for_storage(&self, storage_id: &str) -> Result<SecretReference> {
        debug!("Resolving secret for storage {}", storage_id);

        let request = SecretForStorageGetRequest {
            storage_id: storage_id.to_string(),
        };

        let secret = self
            .client
            .clone()
            .get_secret_for_storage(request)
            .await
            .map_err(upstream_error)?
            .into_inner();

        // The directory may flag an error while still answering; the secret id is used as given
        if secret.error() != SecretError::NoError {
            warn!(
                "Directory flagged {} while resolving secret for storage {}",
                secret.error().as_str_name(),
                storage_id
            );
        }

        Ok(SecretReference::new(secret.secret_id))
    }
}
