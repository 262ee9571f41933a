//! Category endpoints

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, OptionItem};

/// Cache-Control for list responses; lets proxies serve slightly stale
/// lists while they revalidate.
pub const LIST_CACHE_CONTROL: &str =
    "public, max-age=60, s-maxage=120, stale-while-revalidate=600";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// GET /api/categories
///
/// Returns dropdown options sorted by label.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.categories.list().await?;

    let options: Vec<OptionItem> = categories.iter().map(OptionItem::from).collect();

    Ok((
        [(header::CACHE_CONTROL, LIST_CACHE_CONTROL)],
        Json(options),
    ))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(name = %request.name, "Creating category");

    let category = state.categories.create(&request.name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(id = %id, "Deleting category");

    state.categories.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
