//! Request and response types exchanged with the MFT backend services
//!
//! Field names serialize in camelCase so the JSON relayed to HTTP callers
//! matches the backend's protobuf field names. `int64` fields serialize as
//! decimal strings, and a populated oneof carries its member name under
//! `metadata`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Storage type value that marks locally mounted storage.
///
/// Matching is exact and case-sensitive; every other value is remote.
pub const LOCAL_STORAGE_TYPE: &str = "LOCAL";

/// Whether a storage needs a credential to be accessed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Locally mounted storage, no secret required
    Local,
    /// Any other storage, a secret must be resolved first
    Remote,
}

impl StorageKind {
    /// Classify a caller-supplied storage type. A missing value is remote.
    pub fn from_type_name(value: Option<&str>) -> Self {
        match value {
            Some(LOCAL_STORAGE_TYPE) => StorageKind::Local,
            _ => StorageKind::Remote,
        }
    }

    pub fn is_local(self) -> bool {
        self == StorageKind::Local
    }
}

/// A location to query, built per request from caller input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageReference {
    pub storage_id: String,
    pub kind: StorageKind,
    /// Path inside the storage; empty means the storage root
    pub resource_path: String,
}

impl StorageReference {
    pub fn new(
        storage_id: impl Into<String>,
        kind: StorageKind,
        resource_path: impl Into<String>,
    ) -> Self {
        Self {
            storage_id: storage_id.into(),
            kind,
            resource_path: resource_path.into(),
        }
    }
}

/// Credential identifier resolved for a storage. Never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    pub secret_id: String,
}

impl SecretReference {
    pub fn new(secret_id: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
        }
    }

    /// The empty secret used for local storage
    pub fn none() -> Self {
        Self::default()
    }
}

/// Metadata query sent to the transfer service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetadataQuery {
    pub resource_path: String,
    pub storage_id: String,
    pub secret_id: String,
    pub recursive_search: bool,
}

impl ResourceMetadataQuery {
    /// Combine a storage reference with its resolved secret.
    ///
    /// The gateway always asks for a recursive listing.
    pub fn new(storage: &StorageReference, secret: &SecretReference) -> Self {
        Self {
            resource_path: storage.resource_path.clone(),
            storage_id: storage.storage_id.clone(),
            secret_id: secret.secret_id.clone(),
            recursive_search: true,
        }
    }
}

/// One storage known to the directory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEntry {
    pub storage_id: String,
    pub storage_name: String,
    /// Backend storage type name (`S3`, `SCP`, `LOCAL`, ...)
    pub storage_type: String,
}

/// Response of the directory service's list operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageList {
    pub storages: Vec<StorageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub friendly_name: String,
    #[serde(with = "long_string")]
    pub resource_size: i64,
    #[serde(with = "long_string")]
    pub created_time: i64,
    #[serde(with = "long_string")]
    pub update_time: i64,
    pub md5sum: String,
    pub resource_path: String,
    pub parent_resource_id: String,
    pub parent_resource_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryMetadata {
    pub friendly_name: String,
    #[serde(with = "long_string")]
    pub created_time: i64,
    #[serde(with = "long_string")]
    pub update_time: i64,
    pub resource_path: String,
    pub parent_resource_id: String,
    pub parent_resource_type: String,
    pub directories: Vec<DirectoryMetadata>,
    pub files: Vec<FileMetadata>,
    pub lazy_initialized: bool,
}

/// What the transfer service reports for a resource path.
///
/// Serializes as the populated member plus its name under `metadata`
/// (`{"file": {..}, "metadata": "file"}`), or `{}` when the backend set
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceMetadata {
    File(FileMetadata),
    Directory(DirectoryMetadata),
    /// Error reported inside a successful response
    Error(String),
    Empty,
}

impl ResourceMetadata {
    /// Name of the populated oneof member, if any
    pub fn member_name(&self) -> Option<&'static str> {
        match self {
            ResourceMetadata::File(_) => Some("file"),
            ResourceMetadata::Directory(_) => Some("directory"),
            ResourceMetadata::Error(_) => Some("error"),
            ResourceMetadata::Empty => None,
        }
    }
}

impl Serialize for ResourceMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(name) = self.member_name() else {
            return serializer.serialize_map(Some(0))?.end();
        };

        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ResourceMetadata::File(file) => map.serialize_entry(name, file)?,
            ResourceMetadata::Directory(dir) => map.serialize_entry(name, dir)?,
            ResourceMetadata::Error(message) => map.serialize_entry(name, message)?,
            ResourceMetadata::Empty => {}
        }
        map.serialize_entry("metadata", name)?;
        map.end()
    }
}

/// Transfer as submitted by an HTTP caller, before secret resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_storage_id: String,
    #[serde(default)]
    pub source_storage_type: Option<String>,
    #[serde(default)]
    pub source_path: String,
    pub destination_storage_id: String,
    #[serde(default)]
    pub destination_storage_type: Option<String>,
    #[serde(default)]
    pub destination_path: String,
    #[serde(default)]
    pub optimize_transfer_path: bool,
}

impl TransferRequest {
    pub fn source(&self) -> StorageReference {
        StorageReference::new(
            self.source_storage_id.clone(),
            StorageKind::from_type_name(self.source_storage_type.as_deref()),
            self.source_path.clone(),
        )
    }

    pub fn destination(&self) -> StorageReference {
        StorageReference::new(
            self.destination_storage_id.clone(),
            StorageKind::from_type_name(self.destination_storage_type.as_deref()),
            self.destination_path.clone(),
        )
    }
}

/// Transfer with both secrets resolved, ready for the transfer service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOrder {
    pub source_storage_id: String,
    pub source_secret_id: String,
    pub source_path: String,
    pub destination_storage_id: String,
    pub destination_secret_id: String,
    pub destination_path: String,
    pub optimize_transfer_path: bool,
}

impl TransferOrder {
    pub fn new(
        source: &StorageReference,
        source_secret: &SecretReference,
        destination: &StorageReference,
        destination_secret: &SecretReference,
        optimize_transfer_path: bool,
    ) -> Self {
        Self {
            source_storage_id: source.storage_id.clone(),
            source_secret_id: source_secret.secret_id.clone(),
            source_path: source.resource_path.clone(),
            destination_storage_id: destination.storage_id.clone(),
            destination_secret_id: destination_secret.secret_id.clone(),
            destination_path: destination.resource_path.clone(),
            optimize_transfer_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSubmission {
    pub transfer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferState {
    pub state: String,
    #[serde(with = "long_string")]
    pub update_time_mils: i64,
    pub percentage: f64,
    pub description: String,
}

/// `int64` as a decimal string; numbers are accepted on input
mod long_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Long {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Long::deserialize(deserializer)? {
            Long::Text(text) => text.parse().map_err(de::Error::custom),
            Long::Number(value) => Ok(value),
        }
    }
}
