//! Order repository trait

use async_trait::async_trait;

use super::entity::{Order, OrderStatus};
use crate::domain::DomainError;

/// Query parameters for listing orders
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Filter by client
    pub client_id: Option<String>,
    /// Filter by status
    pub status: Option<OrderStatus>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl OrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Repository for orders
#[async_trait]
pub trait OrderRepository: Send + Sync + std::fmt::Debug {
    /// List orders matching the query, newest first
    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, DomainError>;

    /// Get an order by id
    async fn get(&self, id: &str) -> Result<Option<Order>, DomainError>;

    /// Create a new order
    async fn create(&self, order: Order) -> Result<Order, DomainError>;

    /// Update an existing order
    async fn update(&self, order: Order) -> Result<Order, DomainError>;

    /// Delete an order by id
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
