//! In-memory collaborators for tests
//!
//! `FakeDirectory` and `FakeTransfer` answer from canned results and record
//! every call into a shared [`CallLog`], so tests can assert both which
//! backend calls happened and in what order.
//!
//! Available to other crates through the `testing` feature.

use crate::{
    code, ResourceMetadata, ResourceMetadataQuery, Result, SecretReference, StorageDirectory,
    StorageList, TransferOrder, TransferService, TransferState, TransferSubmission, UpstreamError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A backend call observed by a fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListStorages,
    SecretForStorage(String),
    ResourceMetadata(ResourceMetadataQuery),
    SubmitTransfer(TransferOrder),
    TransferState(String),
}

/// Ordered record of calls shared between fakes
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Snapshot of all calls so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of secret lookups recorded
    pub fn secret_lookups(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::SecretForStorage(_)))
            .count()
    }

    /// Metadata queries recorded, in order
    pub fn metadata_queries(&self) -> Vec<ResourceMetadataQuery> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::ResourceMetadata(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }
}

fn not_found(what: &str) -> UpstreamError {
    UpstreamError::new(code::NOT_FOUND, format!("{} not found", what))
}

/// Storage directory answering from canned data
pub struct FakeDirectory {
    log: CallLog,
    storages: Result<StorageList>,
    secrets: HashMap<String, Result<SecretReference>>,
}

impl FakeDirectory {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            storages: Ok(StorageList::default()),
            secrets: HashMap::new(),
        }
    }

    pub fn with_storages(mut self, storages: StorageList) -> Self {
        self.storages = Ok(storages);
        self
    }

    pub fn with_list_error(mut self, err: UpstreamError) -> Self {
        self.storages = Err(err);
        self
    }

    pub fn with_secret(mut self, storage_id: &str, secret: SecretReference) -> Self {
        self.secrets.insert(storage_id.to_string(), Ok(secret));
        self
    }

    pub fn with_secret_error(mut self, storage_id: &str, err: UpstreamError) -> Self {
        self.secrets.insert(storage_id.to_string(), Err(err));
        self
    }
}

#[async_trait]
impl StorageDirectory for FakeDirectory {
    async fn list_storages(&self) -> Result<StorageList> {
        self.log.record(Call::ListStorages);
        self.storages.clone()
    }

    async fn secret_for_storage(&self, storage_id: &str) -> Result<SecretReference> {
        self.log.record(Call::SecretForStorage(storage_id.to_string()));
        match self.secrets.get(storage_id) {
            Some(secret) => secret.clone(),
            None => {
                let what = format!("secret for storage {}", storage_id);
                Err(not_found(&what))
            }
        }
    }
}

/// Transfer service answering from canned data
pub struct FakeTransfer {
    log: CallLog,
    metadata: Result<ResourceMetadata>,
    submission: Result<TransferSubmission>,
    states: HashMap<String, TransferState>,
}

impl FakeTransfer {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            metadata: Ok(ResourceMetadata::Empty),
            submission: Ok(TransferSubmission {
                transfer_id: "transfer-1".to_string(),
            }),
            states: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: ResourceMetadata) -> Self {
        self.metadata = Ok(metadata);
        self
    }

    pub fn with_metadata_error(mut self, err: UpstreamError) -> Self {
        self.metadata = Err(err);
        self
    }

    pub fn with_submit_error(mut self, err: UpstreamError) -> Self {
        self.submission = Err(err);
        self
    }

    pub fn with_state(mut self, transfer_id: &str, state: TransferState) -> Self {
        self.states.insert(transfer_id.to_string(), state);
        self
    }
}

#[async_trait]
impl TransferService for FakeTransfer {
    async fn resource_metadata(&self, query: ResourceMetadataQuery) -> Result<ResourceMetadata> {
        self.log.record(Call::ResourceMetadata(query));
        self.metadata.clone()
    }

    async fn submit_transfer(&self, order: TransferOrder) -> Result<TransferSubmission> {
        self.log.record(Call::SubmitTransfer(order));
        self.submission.clone()
    }

    async fn transfer_state(&self, transfer_id: &str) -> Result<TransferState> {
        self.log.record(Call::TransferState(transfer_id.to_string()));
        match self.states.get(transfer_id) {
            Some(state) => Ok(state.clone()),
            None => Err(not_found(&format!("transfer {}", transfer_id))),
        }
    }
}
