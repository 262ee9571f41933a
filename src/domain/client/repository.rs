//! Client repository trait

use async_trait::async_trait;

use super::entity::Client;
use crate::domain::DomainError;

/// Repository for clients
#[async_trait]
pub trait ClientRepository: Send + Sync + std::fmt::Debug {
    /// List all clients
    async fn list(&self) -> Result<Vec<Client>, DomainError>;

    /// Get a client by id
    async fn get(&self, id: &str) -> Result<Option<Client>, DomainError>;

    /// Create a new client
    async fn create(&self, client: Client) -> Result<Client, DomainError>;

    /// Update an existing client
    async fn update(&self, client: Client) -> Result<Client, DomainError>;

    /// Delete a client by id
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
