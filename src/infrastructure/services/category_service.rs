//! Category service - cached reads, invalidating writes

use std::sync::Arc;

use crate::domain::{Category, CategoryRepository, DomainError, FetchKey, InvalidationSignal, ResourceKind};
use crate::infrastructure::fetch::{FetchOptions, InvalidationBus, SwrCache};

#[derive(Debug, Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    cache: SwrCache,
    bus: InvalidationBus,
    options: FetchOptions,
}

impl CategoryService {
    pub fn new(
        repository: Arc<dyn CategoryRepository>,
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

    /// List all categories sorted by name.
    ///
    /// Served from the shared cache; the store is only queried on a miss or
    /// after an invalidation signal.
    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let key = FetchKey::collection(ResourceKind::Categories);
        let repository = Arc::clone(&self.repository);

        let outcome = self
            .cache
            .fetch(&key, &self.options, move || async move {
                let mut categories = repository.list().await?;
                categories.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(categories)
            })
            .await;

        outcome.ok_or_upstream(key.as_str())
    }

    pub async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let category = Category::new(name)?;
        let created = self.repository.create(category).await?;

        self.bus
            .publish(InvalidationSignal::broad(ResourceKind::Categories));

        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(DomainError::not_found(format!(
                "Category '{}' not found",
                id
            )));
        }

        self.bus
            .publish(InvalidationSignal::targeted(ResourceKind::Categories, id));

        Ok(())
    }
}
