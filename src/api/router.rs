use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::health;
use super::middleware::logging_middleware;
use super::routes::{categories, clients, debug, orders, storage, users};
use super::state::AppState;
use super::types::ApiErrorResponse;

/// Catch-all for unmatched routes and methods
async fn not_found() -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}

/// Create the full router with application state.
///
/// Debug routes are mounted only outside production; in production those
/// paths hit the catch-all like any other unknown route.
pub fn create_router_with_state(state: AppState) -> Router {
    let mut api = Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/categories/{id}", delete(categories::delete_category))
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/users/{user_id}", get(users::get_user))
        .route("/storage/init", get(storage::init_storage));

    if !state.config.environment.is_production() {
        api = api
            .route("/debug/cache", get(debug::cache_state))
            .route("/debug/config", get(debug::config_state));
    }

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_support::in_memory_state;
    use crate::config::{AppConfig, Environment};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_categories_as_sorted_options_with_cache_header() {
        let (state, _coordinator) = in_memory_state();
        state.categories.create("Flyers").await.unwrap();
        state.categories.create("Banners").await.unwrap();

        let app = create_router_with_state(state);
        let response = app.oneshot(get_request("/api/categories")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .unwrap()
                .to_str()
                .unwrap(),
            "public, max-age=60, s-maxage=120, stale-while-revalidate=600"
        );

        let body = body_json(response).await;
        let options = body.as_array().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0]["label"], "Banners");
        assert_eq!(options[1]["label"], "Flyers");
        assert!(options[0]["value"].is_string());
    }

    #[tokio::test]
    async fn test_order_lifecycle_over_http() {
        let (state, mut coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let response = app
            .clone()
            .oneshot(post_request(
                "/api/orders",
                json!({
                    "client_id": "client-a",
                    "items": [
                        {"description": "Vinyl banner", "quantity": 2, "unit_price_cents": 2500}
                    ]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        coordinator.process_pending().await;

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/orders/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["client_id"], "client-a");

        let response = app
            .oneshot(get_request("/api/orders?client_id=client-a"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_category_deletion_over_http() {
        let (state, _coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let response = app
            .clone()
            .oneshot(post_request("/api/categories", json!({"name": "Stickers"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let delete_request = |id: &str| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/categories/{}", id))
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(delete_request(&id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Already gone: the second delete surfaces as a JSON 404
        let response = app.oneshot(delete_request(&id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let (state, _coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let response = app.oneshot(get_request("/api/unknown")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_unknown_user_returns_404() {
        let (state, _coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let response = app.oneshot(get_request("/api/users/ghost")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("ghost"));
    }

    #[tokio::test]
    async fn test_debug_routes_available_in_development() {
        let (state, _coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let response = app.oneshot(get_request("/api/debug/cache")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_debug_routes_hidden_in_production() {
        let (mut state, _coordinator) = in_memory_state();
        state.config = Arc::new(AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        });
        let app = create_router_with_state(state);

        let response = app.oneshot(get_request("/api/debug/config")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_json_error() {
        let (state, _coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let request = Request::builder()
            .method("POST")
            .uri("/api/categories")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_storage_init_warms_reference_data() {
        let (state, _coordinator) = in_memory_state();
        let cache = state.cache.clone();
        let app = create_router_with_state(state);

        let response = app.oneshot(get_request("/api/storage/init")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Storage initialized");

        let keys = cache.keys().await;
        assert!(keys.contains(&"/api/categories".to_string()));
        assert!(keys.contains(&"/api/users".to_string()));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (state, _coordinator) = in_memory_state();
        let app = create_router_with_state(state);

        let response = app
            .clone()
            .oneshot(get_request("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }
}
