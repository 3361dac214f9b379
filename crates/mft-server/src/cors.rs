//! Cross-origin policy
//!
//! Requests carrying an `Origin` outside the allow-list are rejected before
//! any handler runs. Requests without an `Origin` header (same-origin
//! navigation, curl, other services) are always let through.

use crate::api::{PATH_HEADER, STORAGE_TYPE_HEADER};
use crate::error::{WebError, WebResult};
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const CORS_REJECTION: &str =
    "The CORS policy for this site does not allow access from the specified Origin.";

/// Allow-list of origins permitted to call the API from a browser
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<HeaderValue>,
}

impl OriginPolicy {
    pub fn new(origins: &[String]) -> WebResult<Self> {
        let allowed = origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    WebError::InvalidConfig(format!("Invalid allowed origin: {}", origin))
                })
            })
            .collect::<WebResult<Vec<_>>>()?;

        Ok(Self { allowed })
    }

    /// A missing origin is always allowed
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|allowed| allowed == origin),
        }
    }

    /// CORS response headers for allowed origins
    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed.clone()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static(STORAGE_TYPE_HEADER),
                HeaderName::from_static(PATH_HEADER),
            ])
    }
}

/// Axum middleware rejecting disallowed origins with 403
pub async fn origin_guard(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if policy.allows(request.headers().get(header::ORIGIN)) {
        return next.run(request).await;
    }

    tracing::warn!(
        "Rejected {} {} from origin {:?}",
        request.method(),
        request.uri().path(),
        request.headers().get(header::ORIGIN)
    );
    WebError::Forbidden(CORS_REJECTION.to_string()).into_response()
}
