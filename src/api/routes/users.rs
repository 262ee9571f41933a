//! User profile endpoint

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .get(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(Json(user))
}
