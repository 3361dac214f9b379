//! Error types for the HTTP surface

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mft_core_interface::{code, UpstreamError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How upstream failures are reported to HTTP callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamErrorMode {
    /// Error body with HTTP 200; callers inspect the body shape
    #[default]
    Passthrough,
    /// Same body with an HTTP status derived from the gRPC code
    Mapped,
}

impl UpstreamErrorMode {
    pub fn status_for(self, grpc_code: i32) -> StatusCode {
        match self {
            UpstreamErrorMode::Passthrough => StatusCode::OK,
            UpstreamErrorMode::Mapped => match grpc_code {
                code::INVALID_ARGUMENT => StatusCode::BAD_REQUEST,
                code::UNAUTHENTICATED => StatusCode::UNAUTHORIZED,
                code::PERMISSION_DENIED => StatusCode::FORBIDDEN,
                code::NOT_FOUND => StatusCode::NOT_FOUND,
                code::UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
                code::DEADLINE_EXCEEDED => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum WebError {
    #[error("{source}")]
    Upstream {
        source: UpstreamError,
        mode: UpstreamErrorMode,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Upstream { source, mode } => {
                (mode.status_for(source.code), Json(source)).into_response()
            }
            WebError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
            other => {
                tracing::error!("{}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
