//! Client entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Status of a client account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A customer of the print shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new active client with a generated id
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_client_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            email: None,
            phone: None,
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        validate_client_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Reactivate the client
    pub fn activate(&mut self) {
        self.status = ClientStatus::Active;
        self.touch();
    }

    /// Deactivate the client
    pub fn deactivate(&mut self) {
        self.status = ClientStatus::Inactive;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_client_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Client name must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_is_active() {
        let client = Client::new("Acme Corp").unwrap();
        assert!(client.status.is_active());
        assert_eq!(client.created_at, client.updated_at);
    }

    #[test]
    fn test_builder_fields() {
        let client = Client::new("Acme Corp")
            .unwrap()
            .with_email("orders@acme.test")
            .with_phone("+256700000000");

        assert_eq!(client.email.as_deref(), Some("orders@acme.test"));
        assert_eq!(client.phone.as_deref(), Some("+256700000000"));
    }

    #[test]
    fn test_set_name_touches_updated_at() {
        let mut client = Client::new("Acme Corp").unwrap();
        let before = client.updated_at;

        client.set_name("Acme Ltd").unwrap();
        assert_eq!(client.name, "Acme Ltd");
        assert!(client.updated_at >= before);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Client::new("").is_err());
    }

    #[test]
    fn test_activate_after_deactivate() {
        let mut client = Client::new("Acme Corp").unwrap();

        client.deactivate();
        assert!(!client.status.is_active());

        client.activate();
        assert!(client.status.is_active());
    }
}
