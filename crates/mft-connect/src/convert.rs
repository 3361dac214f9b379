//! Conversions between generated protobuf messages and interface types

use mft_core_interface::{
    DirectoryMetadata, FileMetadata, ResourceMetadata, ResourceMetadataQuery, StorageEntry,
    StorageList, TransferOrder, TransferState,
};
use mft_proto::storage_common::{StorageListEntry, StorageListResponse, StorageType};
use mft_proto::transfer_api::{
    self, fetch_resource_metadata_request, resource_metadata, DirectoryMetadataResponse,
    EndpointPaths, FetchResourceMetadataRequest, FileMetadataResponse,
    GetResourceMetadataFromIdsRequest, TransferApiRequest, TransferStateApiResponse,
};

pub(crate) fn storage_list(response: StorageListResponse) -> StorageList {
    StorageList {
        storages: response.storages.into_iter().map(storage_entry).collect(),
    }
}

/// Known storage types render by name; values newer than this build keep
/// their number instead of collapsing to the enum default.
fn storage_type_name(value: i32) -> String {
    StorageType::try_from(value)
        .map(|known| known.as_str_name().to_string())
        .unwrap_or_else(|_| value.to_string())
}

fn storage_entry(entry: StorageListEntry) -> StorageEntry {
    let storage_type = storage_type_name(entry.storage_type);
    StorageEntry {
        storage_id: entry.storage_id,
        storage_name: entry.storage_name,
        storage_type,
    }
}

pub(crate) fn metadata_request(query: ResourceMetadataQuery) -> FetchResourceMetadataRequest {
    FetchResourceMetadataRequest {
        request: Some(fetch_resource_metadata_request::Request::IdRequest(
            GetResourceMetadataFromIdsRequest {
                resource_path: query.resource_path,
                storage_id: query.storage_id,
                secret_id: query.secret_id,
                recursive_search: query.recursive_search,
            },
        )),
    }
}

pub(crate) fn resource_metadata(response: transfer_api::ResourceMetadata) -> ResourceMetadata {
    match response.metadata {
        Some(resource_metadata::Metadata::File(file)) => {
            ResourceMetadata::File(file_metadata(file))
        }
        Some(resource_metadata::Metadata::Directory(dir)) => {
            ResourceMetadata::Directory(directory_metadata(dir))
        }
        Some(resource_metadata::Metadata::Error(message)) => ResourceMetadata::Error(message),
        None => ResourceMetadata::Empty,
    }
}

fn file_metadata(file: FileMetadataResponse) -> FileMetadata {
    FileMetadata {
        friendly_name: file.friendly_name,
        resource_size: file.resource_size,
        created_time: file.created_time,
        update_time: file.update_time,
        md5sum: file.md5sum,
        resource_path: file.resource_path,
        parent_resource_id: file.parent_resource_id,
        parent_resource_type: file.parent_resource_type,
    }
}

fn directory_metadata(dir: DirectoryMetadataResponse) -> DirectoryMetadata {
    DirectoryMetadata {
        friendly_name: dir.friendly_name,
        created_time: dir.created_time,
        update_time: dir.update_time,
        resource_path: dir.resource_path,
        parent_resource_id: dir.parent_resource_id,
        parent_resource_type: dir.parent_resource_type,
        directories: dir.directories.into_iter().map(directory_metadata).collect(),
        files: dir.files.into_iter().map(file_metadata).collect(),
        lazy_initialized: dir.lazy_initialized,
    }
}

pub(crate) fn transfer_request(order: TransferOrder) -> TransferApiRequest {
    TransferApiRequest {
        source_storage_id: order.source_storage_id,
        source_secret_id: order.source_secret_id,
        destination_storage_id: order.destination_storage_id,
        destination_secret_id: order.destination_secret_id,
        endpoint_paths: vec![EndpointPaths {
            source_path: order.source_path,
            destination_path: order.destination_path,
        }],
        optimize_transfer_path: order.optimize_transfer_path,
    }
}

pub(crate) fn transfer_state(response: TransferStateApiResponse) -> TransferState {
    TransferState {
        state: response.state,
        update_time_mils: response.update_time_mils,
        percentage: response.percentage,
        description: response.description,
    }
}
