//! Gateway operations
//!
//! Each operation is a short sequential pipeline over the injected
//! collaborators. No retries: the first failing call ends the operation and
//! its error is returned unchanged.

use mft_core_interface::{
    Collaborators, ResourceMetadata, ResourceMetadataQuery, Result, SecretReference, StorageList,
    StorageReference, TransferOrder, TransferRequest, TransferState, TransferSubmission,
};
use tracing::{debug, info};

/// List every storage known to the directory service
pub async fn list_storages(services: &Collaborators) -> Result<StorageList> {
    services.directory.list_storages().await
}

/// Resolve the secret for a storage.
///
/// Local storage needs no credential and never reaches the directory service.
pub async fn resolve_secret(
    services: &Collaborators,
    storage: &StorageReference,
) -> Result<SecretReference> {
    if storage.kind.is_local() {
        debug!("Storage {} is local, no secret needed", storage.storage_id);
        return Ok(SecretReference::none());
    }

    services
        .directory
        .secret_for_storage(&storage.storage_id)
        .await
}

/// Resolve the secret (remote only), then issue one metadata query.
///
/// A failed secret lookup returns before any metadata query is sent.
pub async fn resolve_resource_metadata(
    services: &Collaborators,
    storage: &StorageReference,
) -> Result<ResourceMetadata> {
    let secret = resolve_secret(services, storage).await?;
    let query = ResourceMetadataQuery::new(storage, &secret);

    debug!(
        "Querying metadata of {:?} in storage {}",
        query.resource_path, query.storage_id
    );
    services.transfer.resource_metadata(query).await
}

/// Resolve the source secret, then the destination secret, then submit.
pub async fn submit_transfer(
    services: &Collaborators,
    request: &TransferRequest,
) -> Result<TransferSubmission> {
    let source = request.source();
    let destination = request.destination();

    let source_secret = resolve_secret(services, &source).await?;
    let destination_secret = resolve_secret(services, &destination).await?;

    let order = TransferOrder::new(
        &source,
        &source_secret,
        &destination,
        &destination_secret,
        request.optimize_transfer_path,
    );

    let submission = services.transfer.submit_transfer(order).await?;
    info!(
        "Transfer {} submitted ({} -> {})",
        submission.transfer_id, source.storage_id, destination.storage_id
    );
    Ok(submission)
}

pub async fn transfer_state(services: &Collaborators, transfer_id: &str) -> Result<TransferState> {
    services.transfer.transfer_state(transfer_id).await
}
