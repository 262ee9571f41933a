//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::DomainError;

/// Repository for staff user profiles
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Get a user by id
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock implementation for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: RwLock<HashMap<String, User>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_users(users: Vec<User>) -> Self {
            let map = users.into_iter().map(|u| (u.id.clone(), u)).collect();
            Self {
                users: RwLock::new(map),
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
            let users = self.users.read().unwrap();
            Ok(users.get(id).cloned())
        }

        async fn list(&self) -> Result<Vec<User>, DomainError> {
            let users = self.users.read().unwrap();
            Ok(users.values().cloned().collect())
        }
    }
}
