//! Category entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// An order category (e.g. "Banners", "Flyers")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with a generated id
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        })
    }

    /// Rehydrate a category from stored fields
    pub fn from_parts(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
        }
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Category name must not be empty"));
    }

    if name.len() > 100 {
        return Err(DomainError::validation(
            "Category name must be at most 100 characters",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Banners").unwrap();
        assert_eq!(category.name, "Banners");
        assert!(!category.id.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Category::new("   ").is_err());
    }

    #[test]
    fn test_overlong_name_rejected() {
        assert!(Category::new("x".repeat(101)).is_err());
    }
}
