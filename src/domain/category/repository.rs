//! Category repository trait

use async_trait::async_trait;

use super::entity::Category;
use crate::domain::DomainError;

/// Repository for order categories
#[async_trait]
pub trait CategoryRepository: Send + Sync + std::fmt::Debug {
    /// List all categories
    async fn list(&self) -> Result<Vec<Category>, DomainError>;

    /// Get a category by id
    async fn get(&self, id: &str) -> Result<Option<Category>, DomainError>;

    /// Create a new category
    async fn create(&self, category: Category) -> Result<Category, DomainError>;

    /// Delete a category by id
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
