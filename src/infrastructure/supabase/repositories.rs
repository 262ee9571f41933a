//! Supabase-backed repository implementations
//!
//! Entities serialize directly to their table rows; PostgREST handles the
//! relational side.

use async_trait::async_trait;

use super::client::SupabaseClient;
use crate::domain::{
    Category, CategoryRepository, Client, ClientRepository, DomainError, Order, OrderQuery,
    OrderRepository, User, UserRepository,
};

const CATEGORIES_TABLE: &str = "categories";
const CLIENTS_TABLE: &str = "clients";
const ORDERS_TABLE: &str = "orders";
const PROFILES_TABLE: &str = "profiles";

#[derive(Debug)]
pub struct SupabaseCategoryRepository {
    client: SupabaseClient,
}

impl SupabaseCategoryRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryRepository for SupabaseCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        self.client.select(CATEGORIES_TABLE, &[]).await
    }

    async fn get(&self, id: &str) -> Result<Option<Category>, DomainError> {
        let mut rows: Vec<Category> = self
            .client
            .select(CATEGORIES_TABLE, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(rows.pop())
    }

    async fn create(&self, category: Category) -> Result<Category, DomainError> {
        self.client.insert(CATEGORIES_TABLE, &category).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.client.delete(CATEGORIES_TABLE, id).await
    }
}

#[derive(Debug)]
pub struct SupabaseClientRepository {
    client: SupabaseClient,
}

impl SupabaseClientRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClientRepository for SupabaseClientRepository {
    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        self.client
            .select(CLIENTS_TABLE, &[("order", "name.asc".to_string())])
            .await
    }

    async fn get(&self, id: &str) -> Result<Option<Client>, DomainError> {
        let mut rows: Vec<Client> = self
            .client
            .select(CLIENTS_TABLE, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(rows.pop())
    }

    async fn create(&self, client: Client) -> Result<Client, DomainError> {
        self.client.insert(CLIENTS_TABLE, &client).await
    }

    async fn update(&self, client: Client) -> Result<Client, DomainError> {
        let id = client.id.clone();
        self.client.update(CLIENTS_TABLE, &id, &client).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.client.delete(CLIENTS_TABLE, id).await
    }
}

#[derive(Debug)]
pub struct SupabaseOrderRepository {
    client: SupabaseClient,
}

impl SupabaseOrderRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for SupabaseOrderRepository {
    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, DomainError> {
        let mut filters: Vec<(&str, String)> = vec![("order", "created_at.desc".to_string())];

        if let Some(client_id) = &query.client_id {
            filters.push(("client_id", format!("eq.{}", client_id)));
        }

        if let Some(status) = query.status {
            filters.push(("status", format!("eq.{}", status)));
        }

        if let Some(limit) = query.limit {
            filters.push(("limit", limit.to_string()));
        }

        self.client.select(ORDERS_TABLE, &filters).await
    }

    async fn get(&self, id: &str) -> Result<Option<Order>, DomainError> {
        let mut rows: Vec<Order> = self
            .client
            .select(ORDERS_TABLE, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(rows.pop())
    }

    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        self.client.insert(ORDERS_TABLE, &order).await
    }

    async fn update(&self, order: Order) -> Result<Order, DomainError> {
        let id = order.id.clone();
        self.client.update(ORDERS_TABLE, &id, &order).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.client.delete(ORDERS_TABLE, id).await
    }
}

#[derive(Debug)]
pub struct SupabaseUserRepository {
    client: SupabaseClient,
}

impl SupabaseUserRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let mut rows: Vec<User> = self
            .client
            .select(PROFILES_TABLE, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(rows.pop())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.client.select(PROFILES_TABLE, &[]).await
    }
}
