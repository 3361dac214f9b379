//! Axum server setup

use crate::cors::{origin_guard, OriginPolicy};
use crate::error::WebResult;
use crate::{api, state::AppState, ServerConfig};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use mft_core_interface::Collaborators;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the gateway router.
///
/// The origin guard is the outermost layer so rejected requests never reach
/// CORS handling or a handler.
pub fn router(state: AppState, policy: OriginPolicy) -> Router {
    let cors = policy.layer();
    let policy = Arc::new(policy);

    Router::new()
        .route("/", get(api::root))
        .route("/list-storages", get(api::list_storages))
        .route("/list-storages/:storageId", get(api::resource_metadata))
        .route("/transfers", post(api::submit_transfer))
        .route("/transfers/:transferId", get(api::transfer_state))
        .route(
            "/health",
            get(|| async {
                axum::Json(serde_json::json!({
                    "status": "ok",
                    "service": "mft-gateway",
                    "version": env!("CARGO_PKG_VERSION")
                }))
            }),
        )
        .fallback(|| async {
            (
                axum::http::StatusCode::NOT_FOUND,
                axum::Json(serde_json::json!({ "error": "Not found" })),
            )
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(policy, origin_guard))
        .with_state(state)
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(config: ServerConfig, services: Collaborators) -> WebResult<()> {
    let policy = OriginPolicy::new(&config.allowed_origins)?;
    let state = AppState::new(services, config.upstream_errors);
    let app = router(state, policy);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("MFT gateway listening on http://{}", addr);
    tracing::info!("   Allowed origins: {:?}", config.allowed_origins);
    tracing::info!("   Upstream errors: {:?}", config.upstream_errors);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("MFT gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
