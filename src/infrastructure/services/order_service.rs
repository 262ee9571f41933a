//! Order service - cached reads, invalidating writes

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{
    DomainError, FetchKey, InvalidationSignal, Order, OrderItem, OrderQuery, OrderRepository,
    OrderStatus, ResourceKind,
};
use crate::infrastructure::fetch::{FetchOptions, InvalidationBus, SwrCache};

/// Payload for creating an order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub client_id: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Payload for updating an order; absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    pub items: Option<Vec<OrderItem>>,
}

#[derive(Debug, Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    cache: SwrCache,
    bus: InvalidationBus,
    options: FetchOptions,
}

impl OrderService {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        cache: SwrCache,
        bus: InvalidationBus,
        options: FetchOptions,
    ) -> Self {
        Self {
            repository,
            cache,
            bus,
            options,
        }
    }

    /// List orders matching the query.
    ///
    /// Each distinct query shape gets its own cache key; all of them share
    /// the orders prefix so a broad revalidation hits every variant.
    pub async fn list(&self, query: OrderQuery) -> Result<Vec<Order>, DomainError> {
        let key = FetchKey::query(ResourceKind::Orders, &query_params(&query));
        let repository = Arc::clone(&self.repository);

        let outcome = self
            .cache
            .fetch(&key, &self.options, move || async move {
                repository.list(&query).await
            })
            .await;

        outcome.ok_or_upstream(key.as_str())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Order>, DomainError> {
        let key = FetchKey::item(ResourceKind::Orders, id);
        let repository = Arc::clone(&self.repository);
        let id = id.to_string();

        let outcome = self
            .cache
            .fetch(&key, &self.options, move || async move {
                repository.get(&id).await
            })
            .await;

        outcome.ok_or_upstream(key.as_str())
    }

    pub async fn create(&self, request: CreateOrderRequest) -> Result<Order, DomainError> {
        let mut order = Order::new(request.client_id)?;

        if let Some(category_id) = request.category_id {
            order = order.with_category(category_id);
        }

        order = order.with_items(request.items)?;

        let created = self.repository.create(order).await?;

        self.bus
            .publish(InvalidationSignal::targeted(ResourceKind::Orders, &created.id));

        Ok(created)
    }

    pub async fn update(&self, id: &str, request: UpdateOrderRequest) -> Result<Order, DomainError> {
        let mut order = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Order '{}' not found", id)))?;

        if let Some(items) = request.items {
            order.set_items(items)?;
        }

        if let Some(status) = request.status {
            order.set_status(status)?;
        }

        let updated = self.repository.update(order).await?;

        self.bus
            .publish(InvalidationSignal::targeted(ResourceKind::Orders, id));

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(DomainError::not_found(format!("Order '{}' not found", id)));
        }

        self.bus
            .publish(InvalidationSignal::targeted(ResourceKind::Orders, id));

        Ok(())
    }
}

fn query_params(query: &OrderQuery) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    if let Some(client_id) = &query.client_id {
        params.insert("client_id".to_string(), client_id.clone());
    }

    if let Some(status) = query.status {
        params.insert("status".to_string(), status.to_string());
    }

    if let Some(limit) = query.limit {
        params.insert("limit".to_string(), limit.to_string());
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::MockOrderRepository;
    use crate::infrastructure::fetch::InvalidationCoordinator;

    fn service() -> (OrderService, InvalidationCoordinator) {
        let cache = SwrCache::new();
        let (bus, rx) = InvalidationBus::channel();
        let coordinator = InvalidationCoordinator::new(cache.clone(), rx);
        let service = OrderService::new(
            Arc::new(MockOrderRepository::new()),
            cache,
            bus,
            FetchOptions::default(),
        );
        (service, coordinator)
    }

    fn create_request(client: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            client_id: client.to_string(),
            category_id: None,
            items: vec![OrderItem {
                description: "Vinyl banner".to_string(),
                quantity: 1,
                unit_price_cents: 2500,
            }],
        }
    }

    #[tokio::test]
    async fn test_filtered_and_unfiltered_lists_use_distinct_keys() {
        let (service, mut coordinator) = service();

        service.create(create_request("client-a")).await.unwrap();
        service.create(create_request("client-b")).await.unwrap();
        coordinator.process_pending().await;

        let all = service.list(OrderQuery::new()).await.unwrap();
        let only_a = service
            .list(OrderQuery::new().with_client("client-a"))
            .await
            .unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(only_a.len(), 1);
    }

    #[tokio::test]
    async fn test_mutation_revalidates_every_list_variant() {
        let (service, mut coordinator) = service();

        service.create(create_request("client-a")).await.unwrap();
        coordinator.process_pending().await;

        // Prime both the plain and the filtered list keys
        assert_eq!(service.list(OrderQuery::new()).await.unwrap().len(), 1);
        assert_eq!(
            service
                .list(OrderQuery::new().with_client("client-a"))
                .await
                .unwrap()
                .len(),
            1
        );

        service.create(create_request("client-a")).await.unwrap();
        coordinator.process_pending().await;

        assert_eq!(service.list(OrderQuery::new()).await.unwrap().len(), 2);
        assert_eq!(
            service
                .list(OrderQuery::new().with_client("client-a"))
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_update_status() {
        let (service, mut coordinator) = service();

        let created = service.create(create_request("client-a")).await.unwrap();
        coordinator.process_pending().await;

        let updated = service
            .update(
                &created.id,
                UpdateOrderRequest {
                    status: Some(OrderStatus::InProgress),
                    items: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::InProgress);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_items() {
        let (service, _coordinator) = service();

        let result = service
            .create(CreateOrderRequest {
                client_id: "client-a".to_string(),
                category_id: None,
                items: vec![OrderItem {
                    description: "Vinyl banner".to_string(),
                    quantity: 0,
                    unit_price_cents: 2500,
                }],
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_order() {
        let (service, _coordinator) = service();
        assert!(service.delete("missing").await.is_err());
    }
}
