//! GrpcTransfer: TransferService implementation backed by MFTTransferService

use async_trait::async_trait;
use mft_core_interface::{
    ResourceMetadata, ResourceMetadataQuery, Result, TransferOrder, TransferService, TransferState,
    TransferSubmission,
};
use mft_proto::transfer_api::TransferStateApiRequest;
use mft_proto::MftTransferServiceClient;
use tonic::transport::Channel;
use tracing::debug;

use crate::convert;
use crate::error::upstream_error;

/// Metadata / transfer service reached over gRPC.
#[derive(Clone)]
pub struct GrpcTransfer {
    client: MftTransferServiceClient<Channel>,
}

impl GrpcTransfer {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: MftTransferServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl TransferService for GrpcTransfer {
    async fn resource_metadata(&self, query: ResourceMetadataQuery) -> Result<ResourceMetadata> {
        debug!(
            "Fetching metadata for {:?} in storage {}",
            query.resource_path, query.storage_id
        );

        let response = self
            .client
            .clone()
            .resource_metadata(convert::metadata_request(query))
            .await
            .map_err(upstream_error)?;

        Ok(convert::resource_metadata(response.into_inner()))
    }

    async fn submit_transfer(&self, order: TransferOrder) -> Result<TransferSubmission> {
        let response = self
            .client
            .clone()
            .submit_transfer(convert::transfer_request(order))
            .await
            .map_err(upstream_error)?
            .into_inner();

        debug!("Backend accepted transfer {}", response.transfer_id);

        Ok(TransferSubmission {
            transfer_id: response.transfer_id,
        })
    }

    async fn transfer_state(&self, transfer_id: &str) -> Result<TransferState> {
        debug!("Fetching state of transfer {}", transfer_id);

        let request = TransferStateApiRequest {
            transfer_id: transfer_id.to_string(),
        };

        let response = self
            .client
            .clone()
            .get_transfer_state(request)
            .await
            .map_err(upstream_error)?;

        Ok(convert::transfer_state(response.into_inner()))
    }
}
