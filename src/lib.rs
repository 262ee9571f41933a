//! Ivan Prints API
//!
//! Business management backend for a print shop:
//! - Supabase-backed (or in-memory) stores for categories, clients, orders
//!   and user profiles
//! - Stale-while-revalidate cache in front of every read
//! - Channel-based cache invalidation from mutation sites
//! - Concurrent reference-data warm-up

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use domain::{CategoryRepository, ClientRepository, OrderRepository, UserRepository};
use infrastructure::fetch::{
    FetchOptions, InvalidationBus, InvalidationCoordinator, SwrCache,
};
use infrastructure::repositories::{
    InMemoryCategoryRepository, InMemoryClientRepository, InMemoryOrderRepository,
    InMemoryUserRepository,
};
use infrastructure::services::{
    CategoryService, ClientService, OrderService, ReferenceDataService, UserService,
};
use infrastructure::supabase::{
    SupabaseCategoryRepository, SupabaseClient, SupabaseClientRepository,
    SupabaseOrderRepository, SupabaseUserRepository,
};

/// Build the application state and the coordinator that must be spawned
/// alongside the server.
///
/// With a `[supabase]` section configured the repositories go through the
/// Supabase REST API; otherwise an in-memory store is used, which is enough
/// for local development.
pub async fn create_app_state(
    config: AppConfig,
) -> anyhow::Result<(AppState, InvalidationCoordinator)> {
    let cache = SwrCache::with_capacity(config.cache.max_capacity);
    let (bus, rx) = InvalidationBus::channel();
    let coordinator = InvalidationCoordinator::new(cache.clone(), rx);
    let options = FetchOptions::default()
        .with_dedup_interval(Duration::from_secs(config.cache.dedup_interval_secs));

    let (category_repo, client_repo, order_repo, user_repo, supabase): (
        Arc<dyn CategoryRepository>,
        Arc<dyn ClientRepository>,
        Arc<dyn OrderRepository>,
        Arc<dyn UserRepository>,
        Option<SupabaseClient>,
    ) = match &config.supabase {
        Some(supabase_config) => {
            info!(url = %supabase_config.url, "Using Supabase-backed repositories");
            let client = SupabaseClient::new(supabase_config)?;

            (
                Arc::new(SupabaseCategoryRepository::new(client.clone())),
                Arc::new(SupabaseClientRepository::new(client.clone())),
                Arc::new(SupabaseOrderRepository::new(client.clone())),
                Arc::new(SupabaseUserRepository::new(client.clone())),
                Some(client),
            )
        }
        None => {
            info!("No Supabase configuration found; using in-memory repositories");

            (
                Arc::new(InMemoryCategoryRepository::with_defaults()),
                Arc::new(InMemoryClientRepository::new()),
                Arc::new(InMemoryOrderRepository::new()),
                Arc::new(InMemoryUserRepository::with_defaults()),
                None,
            )
        }
    };

    let categories = CategoryService::new(category_repo, cache.clone(), bus.clone(), options.clone());
    let clients = ClientService::new(client_repo, cache.clone(), bus.clone(), options.clone());
    let orders = OrderService::new(order_repo, cache.clone(), bus.clone(), options.clone());
    let users = UserService::new(user_repo, cache.clone(), options);
    let reference = ReferenceDataService::new(categories.clone(), clients.clone(), users.clone());

    let state = AppState {
        categories,
        clients,
        orders,
        users,
        reference,
        cache,
        supabase,
        config: Arc::new(config),
    };

    Ok((state, coordinator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_defaults_to_in_memory() {
        let (state, _coordinator) = create_app_state(AppConfig::default()).await.unwrap();

        assert!(state.supabase.is_none());

        // Seeded defaults are reachable through the services
        let categories = state.categories.list().await.unwrap();
        assert!(!categories.is_empty());
    }
}
