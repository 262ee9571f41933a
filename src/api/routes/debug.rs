//! Development-only introspection endpoints
//!
//! Mounted only outside production; in production these paths fall through
//! to the 404 catch-all.

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

#[derive(Debug, Serialize)]
pub struct CacheDebugResponse {
    pub entry_count: u64,
    pub keys: Vec<String>,
}

/// GET /api/debug/cache
pub async fn cache_state(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut keys = state.cache.keys().await;
    keys.sort();

    Ok(Json(CacheDebugResponse {
        entry_count: state.cache.entry_count().await,
        keys,
    }))
}

/// GET /api/debug/config
///
/// Secrets never leave the process; only the Supabase URL is shown.
pub async fn config_state(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let config = &state.config;

    Ok(Json(json!({
        "environment": format!("{:?}", config.environment).to_lowercase(),
        "server": {
            "host": config.server.host,
            "port": config.server.port,
        },
        "logging": {
            "level": config.logging.level,
        },
        "cache": {
            "dedup_interval_secs": config.cache.dedup_interval_secs,
            "max_capacity": config.cache.max_capacity,
        },
        "supabase": config.supabase.as_ref().map(|s| json!({ "url": s.url })),
    })))
}
