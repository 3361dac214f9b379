//! Error types for the mft-connect crate

use mft_core_interface::{code, UpstreamError};
use thiserror::Error;
use tonic::metadata::KeyAndValueRef;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Invalid endpoint {address}: {reason}")]
    InvalidEndpoint { address: String, reason: String },
}

impl From<ConnectError> for UpstreamError {
    fn from(err: ConnectError) -> Self {
        UpstreamError::new(code::UNAVAILABLE, err.to_string())
    }
}

/// Convert a gRPC status into the gateway's upstream error.
///
/// The code and message are kept as-is. Binary metadata entries are dropped.
pub fn upstream_error(status: tonic::Status) -> UpstreamError {
    let mut err = UpstreamError::new(status.code() as i32, status.message());

    for entry in status.metadata().iter() {
        if let KeyAndValueRef::Ascii(key, value) = entry {
            if let Ok(value) = value.to_str() {
                err = err.with_metadata(key.as_str(), value);
            }
        }
    }

    err
}
