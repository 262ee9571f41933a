//! Client endpoints

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::debug;

use super::categories::LIST_CACHE_CONTROL;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::services::{CreateClientRequest, UpdateClientRequest};

/// GET /api/clients
pub async fn list_clients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let clients = state.clients.list().await?;

    Ok(([(header::CACHE_CONTROL, LIST_CACHE_CONTROL)], Json(clients)))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state
        .clients
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Client '{}' not found", id)))?;

    Ok(Json(client))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(name = %request.name, "Creating client");

    let client = state.clients.create(request).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(id = %id, "Updating client");

    let client = state.clients.update(&id, request).await?;

    Ok(Json(client))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(id = %id, "Deleting client");

    state.clients.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
