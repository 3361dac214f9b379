//! Storage browsing endpoints

use crate::error::WebResult;
use crate::gateway;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use mft_core_interface::{ResourceMetadata, StorageKind, StorageList, StorageReference};
use serde_json::{json, Value};

/// Header naming the storage type (`LOCAL` or anything else)
pub const STORAGE_TYPE_HEADER: &str = "storagetype";

/// Header carrying the resource path inside the storage
pub const PATH_HEADER: &str = "path";

/// Static greeting, no backend call
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "You've reached te MFT API!" }))
}

/// List storages from the directory service
pub async fn list_storages(State(state): State<AppState>) -> WebResult<Json<StorageList>> {
    tracing::info!("Listing storages");

    gateway::list_storages(&state.services)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::warn!("Listing storages failed: {}", e);
            state.upstream(e)
        })
}

/// Resolve metadata for a path inside a storage
pub async fn resource_metadata(
    State(state): State<AppState>,
    Path(storage_id): Path<String>,
    headers: HeaderMap,
) -> WebResult<Json<ResourceMetadata>> {
    let storage_type = header_str(&headers, STORAGE_TYPE_HEADER);
    let path = header_str(&headers, PATH_HEADER).unwrap_or_default();

    let kind = StorageKind::from_type_name(storage_type);
    let storage = StorageReference::new(storage_id, kind, path);

    tracing::info!(
        "Resolving metadata for {:?} in storage {} ({:?})",
        storage.resource_path,
        storage.storage_id,
        storage.kind
    );

    gateway::resolve_resource_metadata(&state.services, &storage)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::warn!(
                "Metadata resolution for {} failed: {}",
                storage.storage_id,
                e
            );
            state.upstream(e)
        })
}

/// Header value as text; non-UTF-8 values count as absent
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
