//! In-memory repository implementations
//!
//! Used when no Supabase project is configured (local development). Data
//! lives for the lifetime of the process.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Category, CategoryRepository, Client, ClientRepository, DomainError, Order, OrderQuery,
    OrderRepository, User, UserRepository, UserRole,
};

#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<HashMap<String, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with the default print-shop categories
    pub fn with_defaults() -> Self {
        let repo = Self::new();

        {
            let mut categories = repo.categories.write().unwrap();

            for name in ["Banners", "Business Cards", "Flyers", "Stickers"] {
                let category = Category::from_parts(
                    format!("cat-{}", name.to_lowercase().replace(' ', "-")),
                    name,
                    Utc::now(),
                );
                categories.insert(category.id.clone(), category);
            }
        }

        repo
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().unwrap();
        Ok(categories.get(id).cloned())
    }

    async fn create(&self, category: Category) -> Result<Category, DomainError> {
        let mut categories = self.categories.write().unwrap();

        if categories.values().any(|c| c.name == category.name) {
            return Err(DomainError::conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }

        categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut categories = self.categories.write().unwrap();
        Ok(categories.remove(id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    clients: RwLock<HashMap<String, Client>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        let clients = self.clients.read().unwrap();
        let mut result: Vec<Client> = clients.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn get(&self, id: &str) -> Result<Option<Client>, DomainError> {
        let clients = self.clients.read().unwrap();
        Ok(clients.get(id).cloned())
    }

    async fn create(&self, client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().unwrap();

        if clients.contains_key(&client.id) {
            return Err(DomainError::conflict(format!(
                "Client '{}' already exists",
                client.id
            )));
        }

        clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    async fn update(&self, client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().unwrap();

        if !clients.contains_key(&client.id) {
            return Err(DomainError::not_found(format!(
                "Client '{}' not found",
                client.id
            )));
        }

        clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut clients = self.clients.write().unwrap();
        Ok(clients.remove(id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().unwrap();
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| {
                query
                    .client_id
                    .as_ref()
                    .map(|c| &o.client_id == c)
                    .unwrap_or(true)
            })
            .filter(|o| query.status.map(|s| o.status == s).unwrap_or(true))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }

        Ok(result)
    }

    async fn get(&self, id: &str) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(id).cloned())
    }

    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().unwrap();

        if orders.contains_key(&order.id) {
            return Err(DomainError::conflict(format!(
                "Order '{}' already exists",
                order.id
            )));
        }

        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().unwrap();

        if !orders.contains_key(&order.id) {
            return Err(DomainError::not_found(format!(
                "Order '{}' not found",
                order.id
            )));
        }

        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut orders = self.orders.write().unwrap();
        Ok(orders.remove(id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a single admin user for local development
    pub fn with_defaults() -> Self {
        let repo = Self::new();

        {
            let mut users = repo.users.write().unwrap();
            let admin = User {
                id: "dev-admin".to_string(),
                name: "Ivan".to_string(),
                email: "admin@ivanprints.local".to_string(),
                role: UserRole::Admin,
                created_at: Utc::now(),
            };
            users.insert(admin.id.clone(), admin);
        }

        repo
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_categories_seeded() {
        let repo = InMemoryCategoryRepository::with_defaults();
        let categories = repo.list().await.unwrap();
        assert_eq!(categories.len(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_rejected() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(Category::new("Banners").unwrap()).await.unwrap();

        let result = repo.create(Category::new("Banners").unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_order_lifecycle() {
        let repo = InMemoryOrderRepository::new();
        let order = Order::new("client-1").unwrap();
        let id = order.id.clone();

        repo.create(order).await.unwrap();

        let mut stored = repo.get(&id).await.unwrap().unwrap();
        stored.set_status(crate::domain::OrderStatus::InProgress).unwrap();
        repo.update(stored).await.unwrap();

        let orders = repo.list(&OrderQuery::new()).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert!(repo.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_default_admin_user() {
        let repo = InMemoryUserRepository::with_defaults();
        let user = repo.get("dev-admin").await.unwrap().unwrap();
        assert!(user.role.can_manage_users());
    }
}
