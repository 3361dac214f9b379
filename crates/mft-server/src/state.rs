//! Application state shared across all handlers

use crate::error::{UpstreamErrorMode, WebError};
use mft_core_interface::{Collaborators, UpstreamError};

/// Shared state: the backend collaborators and the error reporting mode.
///
/// Holds no mutable data; requests never coordinate with each other.
#[derive(Clone, Debug)]
pub struct AppState {
    pub services: Collaborators,
    pub upstream_errors: UpstreamErrorMode,
}

impl AppState {
    pub fn new(services: Collaborators, upstream_errors: UpstreamErrorMode) -> Self {
        Self {
            services,
            upstream_errors,
        }
    }

    /// Wrap an upstream failure for the configured reporting mode
    pub fn upstream(&self, source: UpstreamError) -> WebError {
        WebError::Upstream {
            source,
            mode: self.upstream_errors,
        }
    }
}
