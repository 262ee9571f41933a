//! User profile service

use std::sync::Arc;

use crate::domain::{DomainError, FetchKey, ResourceKind, User, UserRepository};
use crate::infrastructure::fetch::{FetchOptions, SwrCache};

#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    cache: SwrCache,
    options: FetchOptions,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, cache: SwrCache, options: FetchOptions) -> Self {
        Self {
            repository,
            cache,
            options,
        }
    }

    /// Get a user profile, cached under its item key.
    ///
    /// Profiles are managed in Supabase auth; there is no mutation path here
    /// so entries only refresh on staleness.
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let key = FetchKey::item(ResourceKind::Users, id);
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

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        let key = FetchKey::collection(ResourceKind::Users);
        let repository = Arc::clone(&self.repository);

        let outcome = self
            .cache
            .fetch(&key, &self.options, move || async move {
                repository.list().await
            })
            .await;

        outcome.ok_or_upstream(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::domain::UserRole;
    use chrono::Utc;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "Ivan".to_string(),
            email: "ivan@example.test".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_known_user() {
        let repo = MockUserRepository::with_users(vec![user("user-1")]);
        let service = UserService::new(Arc::new(repo), SwrCache::new(), FetchOptions::default());

        let fetched = service.get("user-1").await.unwrap();
        assert_eq!(fetched.unwrap().id, "user-1");
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_none_not_error() {
        let repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(repo), SwrCache::new(), FetchOptions::default());

        assert!(service.get("missing").await.unwrap().is_none());
    }
}
