//! Storage verification and reference-data warm-up

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

#[derive(Debug, Serialize)]
pub struct StorageInitResponse {
    pub message: String,
}

/// GET /api/storage/init
///
/// Verifies the backing store is reachable, then loads every reference
/// resource concurrently to prime the cache. Partial warm-up failures are
/// reported but do not fail the request.
pub async fn init_storage(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    if let Some(supabase) = &state.supabase {
        supabase.storage_healthy().await?;
    }

    let report = state.reference.warm().await;

    let message = if report.all_loaded() {
        info!(loaded = report.loaded.len(), "Storage initialized");
        "Storage initialized".to_string()
    } else {
        warn!(failed = ?report.failed, "Storage initialized with partial reference data");
        format!(
            "Storage initialized; failed to load: {}",
            report.failed.join(", ")
        )
    };

    Ok(Json(StorageInitResponse { message }))
}
