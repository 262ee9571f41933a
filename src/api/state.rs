//! Application state for shared services

use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::fetch::SwrCache;
use crate::infrastructure::services::{
    CategoryService, ClientService, OrderService, ReferenceDataService, UserService,
};
use crate::infrastructure::supabase::SupabaseClient;

/// Shared per-request state.
///
/// Services are cheap to clone; they share one cache and one invalidation
/// channel underneath.
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub clients: ClientService,
    pub orders: OrderService,
    pub users: UserService,
    pub reference: ReferenceDataService,
    pub cache: SwrCache,
    /// Present only when the app is backed by Supabase; used for the
    /// storage health probe.
    pub supabase: Option<SupabaseClient>,
    pub config: Arc<AppConfig>,
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::infrastructure::fetch::{FetchOptions, InvalidationBus, InvalidationCoordinator};
    use crate::infrastructure::repositories::{
        InMemoryCategoryRepository, InMemoryClientRepository, InMemoryOrderRepository,
        InMemoryUserRepository,
    };

    /// Build a fully in-memory state plus the coordinator draining its
    /// invalidation channel.
    pub fn in_memory_state() -> (AppState, InvalidationCoordinator) {
        let cache = SwrCache::new();
        let (bus, rx) = InvalidationBus::channel();
        let coordinator = InvalidationCoordinator::new(cache.clone(), rx);
        let options = FetchOptions::default();

        let categories = CategoryService::new(
            Arc::new(InMemoryCategoryRepository::new()),
            cache.clone(),
            bus.clone(),
            options.clone(),
        );
        let clients = ClientService::new(
            Arc::new(InMemoryClientRepository::new()),
            cache.clone(),
            bus.clone(),
            options.clone(),
        );
        let orders = OrderService::new(
            Arc::new(InMemoryOrderRepository::new()),
            cache.clone(),
            bus.clone(),
            options.clone(),
        );
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::with_defaults()),
            cache.clone(),
            options,
        );
        let reference =
            ReferenceDataService::new(categories.clone(), clients.clone(), users.clone());

        let state = AppState {
            categories,
            clients,
            orders,
            users,
            reference,
            cache,
            supabase: None,
            config: Arc::new(AppConfig::default()),
        };

        (state, coordinator)
    }
}
