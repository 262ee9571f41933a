//! Order endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

use super::categories::LIST_CACHE_CONTROL;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{OrderQuery, OrderStatus};
use crate::infrastructure::services::{CreateOrderRequest, UpdateOrderRequest};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersParams {
    pub client_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub limit: Option<usize>,
}

impl From<ListOrdersParams> for OrderQuery {
    fn from(params: ListOrdersParams) -> Self {
        let mut query = OrderQuery::new();

        if let Some(client_id) = params.client_id {
            query = query.with_client(client_id);
        }

        if let Some(status) = params.status {
            query = query.with_status(status);
        }

        if let Some(limit) = params.limit {
            query = query.with_limit(limit);
        }

        query
    }
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListOrdersParams>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.orders.list(params.into()).await?;

    Ok(([(header::CACHE_CONTROL, LIST_CACHE_CONTROL)], Json(orders)))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .orders
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order '{}' not found", id)))?;

    Ok(Json(order))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(client_id = %request.client_id, "Creating order");

    let order = state.orders.create(request).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(id = %id, "Updating order");

    let order = state.orders.update(&id, request).await?;

    Ok(Json(order))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(id = %id, "Deleting order");

    state.orders.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
