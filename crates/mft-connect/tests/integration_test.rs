//! Integration tests for mft-connect
//!
//! Each test stands up in-process gRPC backends on an ephemeral port and
//! drives them through the collaborator handle built by `ServiceConnector`.

use mft_connect::{ServiceConnector, ServiceEndpoints};
use mft_core_interface::{
    code, ResourceMetadata, ResourceMetadataQuery, SecretReference, StorageKind, StorageReference,
    TransferOrder,
};
use mft_proto::storage_common::{
    Error as SecretError, SecretForStorage, SecretForStorageGetRequest, StorageListEntry,
    StorageListRequest, StorageListResponse, StorageType,
};
use mft_proto::transfer_api::{
    fetch_resource_metadata_request, resource_metadata, FetchResourceMetadataRequest,
    FileMetadataResponse, TransferApiRequest, TransferApiResponse, TransferStateApiRequest,
    TransferStateApiResponse,
};
use mft_proto::{
    MftTransferService, MftTransferServiceServer, StorageCommonService, StorageCommonServiceServer,
};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Directory backend: knows storage "s3-1" with secret "s3-secret"
struct TestDirectory;

#[tonic::async_trait]
impl StorageCommonService for TestDirectory {
    async fn list_storages(
        &self,
        _request: Request<StorageListRequest>,
    ) -> Result<Response<StorageListResponse>, Status> {
        Ok(Response::new(StorageListResponse {
            storages: vec![StorageListEntry {
                storage_id: "s3-1".to_string(),
                storage_name: "archive".to_string(),
                storage_type: StorageType::S3 as i32,
            }],
        }))
    }

    async fn get_secret_for_storage(
        &self,
        request: Request<SecretForStorageGetRequest>,
    ) -> Result<Response<SecretForStorage>, Status> {
        let storage_id = request.into_inner().storage_id;
        if storage_id != "s3-1" {
            return Err(Status::internal("Failed fetching secret for storage"));
        }

        Ok(Response::new(SecretForStorage {
            storage_id,
            secret_id: "s3-secret".to_string(),
            storage_type: StorageType::S3 as i32,
            error: SecretError::NoError as i32,
        }))
    }
}

/// Transfer backend: records what it receives
#[derive(Default)]
struct TestTransfer {
    metadata_requests: Arc<Mutex<Vec<FetchResourceMetadataRequest>>>,
    transfer_requests: Arc<Mutex<Vec<TransferApiRequest>>>,
}

#[tonic::async_trait]
impl MftTransferService for TestTransfer {
    async fn submit_transfer(
        &self,
        request: Request<TransferApiRequest>,
    ) -> Result<Response<TransferApiResponse>, Status> {
        self.transfer_requests
            .lock()
            .unwrap()
            .push(request.into_inner());
        Ok(Response::new(TransferApiResponse {
            transfer_id: "tr-42".to_string(),
        }))
    }

    async fn get_transfer_state(
        &self,
        request: Request<TransferStateApiRequest>,
    ) -> Result<Response<TransferStateApiResponse>, Status> {
        let transfer_id = request.into_inner().transfer_id;
        if transfer_id != "tr-42" {
            return Err(Status::not_found("Could not find a transfer state"));
        }

        Ok(Response::new(TransferStateApiResponse {
            state: "COMPLETED".to_string(),
            update_time_mils: 1_700_000_000_000,
            percentage: 1.0,
            description: "Transfer completed".to_string(),
        }))
    }

    async fn resource_metadata(
        &self,
        request: Request<FetchResourceMetadataRequest>,
    ) -> Result<Response<mft_proto::transfer_api::ResourceMetadata>, Status> {
        self.metadata_requests
            .lock()
            .unwrap()
            .push(request.into_inner());

        Ok(Response::new(mft_proto::transfer_api::ResourceMetadata {
            metadata: Some(resource_metadata::Metadata::File(FileMetadataResponse {
                friendly_name: "report.csv".to_string(),
                resource_size: 2048,
                resource_path: "/data/report.csv".to_string(),
                ..Default::default()
            })),
        }))
    }
}

/// Start both backends on one ephemeral port
async fn start_backend(transfer: TestTransfer) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        Server::builder()
            .add_service(StorageCommonServiceServer::new(TestDirectory))
            .add_service(MftTransferServiceServer::new(transfer))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("test backend failed");
    });

    Ok(addr)
}

fn endpoints(addr: SocketAddr) -> ServiceEndpoints {
    let address = format!("http://{}", addr);
    ServiceEndpoints::new(address.clone(), address)
}

#[tokio::test]
async fn test_list_storages_over_grpc() -> anyhow::Result<()> {
    let addr = start_backend(TestTransfer::default()).await?;
    let services = ServiceConnector::connect_lazy(&endpoints(addr))?;

    let list = services.directory.list_storages().await?;
    assert_eq!(list.storages.len(), 1);
    assert_eq!(list.storages[0].storage_id, "s3-1");
    assert_eq!(list.storages[0].storage_name, "archive");
    assert_eq!(list.storages[0].storage_type, "S3");

    Ok(())
}

#[tokio::test]
async fn test_secret_lookup_success_and_failure() -> anyhow::Result<()> {
    let addr = start_backend(TestTransfer::default()).await?;
    let services = ServiceConnector::connect_lazy(&endpoints(addr))?;

    let secret = services.directory.secret_for_storage("s3-1").await?;
    assert_eq!(secret, SecretReference::new("s3-secret"));

    let err = services
        .directory
        .secret_for_storage("unknown")
        .await
        .unwrap_err();
    assert_eq!(err.code, code::INTERNAL);
    assert_eq!(err.details, "Failed fetching secret for storage");

    Ok(())
}

#[tokio::test]
async fn test_resource_metadata_sends_recursive_id_request() -> anyhow::Result<()> {
    let transfer = TestTransfer::default();
    let received = transfer.metadata_requests.clone();
    let addr = start_backend(transfer).await?;
    let services = ServiceConnector::connect_lazy(&endpoints(addr))?;

    let storage = StorageReference::new("s3-1", StorageKind::Remote, "/data");
    let query = ResourceMetadataQuery::new(&storage, &SecretReference::new("s3-secret"));
    let metadata = services.transfer.resource_metadata(query).await?;

    match metadata {
        ResourceMetadata::File(file) => {
            assert_eq!(file.friendly_name, "report.csv");
            assert_eq!(file.resource_size, 2048);
        }
        other => panic!("expected file metadata, got {:?}", other),
    }

    let requests = received.lock().unwrap();
    assert_eq!(requests.len(), 1);
    match &requests[0].request {
        Some(fetch_resource_metadata_request::Request::IdRequest(id)) => {
            assert_eq!(id.storage_id, "s3-1");
            assert_eq!(id.secret_id, "s3-secret");
            assert_eq!(id.resource_path, "/data");
            assert!(id.recursive_search);
        }
        None => panic!("id request missing"),
    }

    Ok(())
}

#[tokio::test]
async fn test_submit_transfer_and_poll_state() -> anyhow::Result<()> {
    let transfer = TestTransfer::default();
    let received = transfer.transfer_requests.clone();
    let addr = start_backend(transfer).await?;
    let services = ServiceConnector::connect_lazy(&endpoints(addr))?;

    let order = TransferOrder {
        source_storage_id: "s3-1".to_string(),
        source_secret_id: "s3-secret".to_string(),
        source_path: "/in/a.bin".to_string(),
        destination_storage_id: "local-1".to_string(),
        destination_secret_id: String::new(),
        destination_path: "/out/a.bin".to_string(),
        optimize_transfer_path: false,
    };

    let submission = services.transfer.submit_transfer(order).await?;
    assert_eq!(submission.transfer_id, "tr-42");

    {
        let requests = received.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint_paths.len(), 1);
        assert_eq!(requests[0].endpoint_paths[0].source_path, "/in/a.bin");
        assert_eq!(requests[0].endpoint_paths[0].destination_path, "/out/a.bin");
        assert_eq!(requests[0].destination_secret_id, "");
    }

    let state = services.transfer.transfer_state("tr-42").await?;
    assert_eq!(state.state, "COMPLETED");
    assert_eq!(state.percentage, 1.0);

    let err = services.transfer.transfer_state("nope").await.unwrap_err();
    assert_eq!(err.code, code::NOT_FOUND);

    Ok(())
}

/// Captured log output shared with the subscriber
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_submit_transfer_leaves_info_log_to_gateway() -> anyhow::Result<()> {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let addr = start_backend(TestTransfer::default()).await?;
    let services = ServiceConnector::connect_lazy(&endpoints(addr))?;

    let order = TransferOrder {
        source_storage_id: "s3-1".to_string(),
        source_secret_id: "s3-secret".to_string(),
        source_path: "/in/a.bin".to_string(),
        destination_storage_id: "local-1".to_string(),
        destination_secret_id: String::new(),
        destination_path: "/out/a.bin".to_string(),
        optimize_transfer_path: false,
    };
    let submission = services.transfer.submit_transfer(order).await?;
    assert_eq!(submission.transfer_id, "tr-42");

    // The gateway logs the accepted transfer once; the client stays at debug
    let output = logs.contents();
    assert!(
        !output.contains("mft_connect"),
        "unexpected output: {}",
        output
    );

    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() -> anyhow::Result<()> {
    // Reserve a port, then free it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let services = ServiceConnector::connect_lazy(&endpoints(addr))?;
    let err = services.directory.list_storages().await.unwrap_err();
    assert_eq!(err.code, code::UNAVAILABLE);

    Ok(())
}
