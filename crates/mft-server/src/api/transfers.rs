//! Transfer endpoints

use crate::error::WebResult;
use crate::gateway;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use mft_core_interface::{TransferRequest, TransferState, TransferSubmission};

/// Submit a transfer after resolving both storage secrets
pub async fn submit_transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> WebResult<Json<TransferSubmission>> {
    tracing::info!(
        "Transfer requested: {}:{} -> {}:{}",
        request.source_storage_id,
        request.source_path,
        request.destination_storage_id,
        request.destination_path
    );

    gateway::submit_transfer(&state.services, &request)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::warn!("Transfer submission failed: {}", e);
            state.upstream(e)
        })
}

pub async fn transfer_state(
    State(state): State<AppState>,
    Path(transfer_id): Path<String>,
) -> WebResult<Json<TransferState>> {
    gateway::transfer_state(&state.services, &transfer_id)
        .await
        .map(Json)
        .map_err(|e| state.upstream(e))
}
