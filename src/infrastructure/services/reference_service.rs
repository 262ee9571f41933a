//! Reference data warm-up
//!
//! Fans out one query per reference resource through the batch fetcher so a
//! single slow or failing table never blocks the others. Loading through the
//! services also primes the shared cache, which is what the dropdown
//! endpoints read from.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;

use super::{CategoryService, ClientService, UserService};
use crate::domain::{batch_fetch, DomainError};

/// Which reference resources loaded during a warm-up pass
#[derive(Debug, Clone, Serialize)]
pub struct WarmupReport {
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
}

impl WarmupReport {
    pub fn all_loaded(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceDataService {
    categories: CategoryService,
    clients: ClientService,
    users: UserService,
}

impl ReferenceDataService {
    pub fn new(categories: CategoryService, clients: ClientService, users: UserService) -> Self {
        Self {
            categories,
            clients,
            users,
        }
    }

    /// Load every reference resource concurrently.
    ///
    /// Slots fail independently; the report names which labels loaded and
    /// which did not.
    pub async fn warm(&self) -> WarmupReport {
        let categories = self.categories.clone();
        let clients = self.clients.clone();
        let users = self.users.clone();

        let queries: Vec<(String, BoxFuture<'static, Result<Value, DomainError>>)> = vec![
            (
                "categories".to_string(),
                async move { to_value(categories.list().await?) }.boxed(),
            ),
            (
                "clients".to_string(),
                async move { to_value(clients.list().await?) }.boxed(),
            ),
            (
                "users".to_string(),
                async move { to_value(users.list().await?) }.boxed(),
            ),
        ];

        let labels: Vec<String> = queries.iter().map(|(label, _)| label.clone()).collect();
        let results = batch_fetch(queries).await;

        let mut report = WarmupReport {
            loaded: Vec::new(),
            failed: Vec::new(),
        };

        for (label, result) in labels.into_iter().zip(results) {
            match result {
                Some(_) => report.loaded.push(label),
                None => report.failed.push(label),
            }
        }

        report
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::internal(format!("Failed to serialize reference data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::MockCategoryRepository;
    use crate::domain::client::MockClientRepository;
    use crate::domain::user::MockUserRepository;
    use crate::domain::Category;
    use crate::infrastructure::fetch::{FetchOptions, InvalidationBus, SwrCache};
    use std::sync::Arc;

    fn service() -> (ReferenceDataService, SwrCache) {
        let cache = SwrCache::new();
        let (bus, _rx) = InvalidationBus::channel();
        let options = FetchOptions::default();

        let categories = CategoryService::new(
            Arc::new(MockCategoryRepository::with_categories(vec![
                Category::new("Banners").unwrap(),
            ])),
            cache.clone(),
            bus.clone(),
            options.clone(),
        );
        let clients = ClientService::new(
            Arc::new(MockClientRepository::new()),
            cache.clone(),
            bus.clone(),
            options.clone(),
        );
        let users = UserService::new(
            Arc::new(MockUserRepository::new()),
            cache.clone(),
            options,
        );

        (ReferenceDataService::new(categories, clients, users), cache)
    }

    #[tokio::test]
    async fn test_warm_loads_all_resources() {
        let (service, cache) = service();

        let report = service.warm().await;
        assert!(report.all_loaded());
        assert_eq!(report.loaded, vec!["categories", "clients", "users"]);

        // The pass primed the shared cache
        let mut keys = cache.keys().await;
        keys.sort();
        assert_eq!(keys, vec!["/api/categories", "/api/clients", "/api/users"]);
    }
}
