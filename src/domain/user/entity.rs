//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a staff user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl UserRole {
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A staff user of the application.
///
/// Accounts live in Supabase auth; this entity only mirrors the profile row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
