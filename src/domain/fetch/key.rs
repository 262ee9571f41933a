//! Typed fetch key construction
//!
//! Cache keys are never built by ad hoc string concatenation at call sites.
//! Every key goes through [`FetchKey`], which produces the canonical string
//! for a resource collection, a single item, or a parameterized query.

use std::collections::BTreeMap;
use std::fmt;

/// The resource categories served by the API.
///
/// Each kind maps to one endpoint prefix; broad invalidation operates on
/// that prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Categories,
    Clients,
    Orders,
    Users,
}

impl ResourceKind {
    /// Endpoint prefix shared by every key of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Categories => "/api/categories",
            Self::Clients => "/api/clients",
            Self::Orders => "/api/orders",
            Self::Users => "/api/users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categories => write!(f, "categories"),
            Self::Clients => write!(f, "clients"),
            Self::Orders => write!(f, "orders"),
            Self::Users => write!(f, "users"),
        }
    }
}

/// Canonical cache key for a single query shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey(String);

impl FetchKey {
    /// Key for the full collection of a resource
    pub fn collection(kind: ResourceKind) -> Self {
        Self(kind.prefix().to_string())
    }

    /// Key for a single item
    pub fn item(kind: ResourceKind, id: &str) -> Self {
        Self(format!("{}/{}", kind.prefix(), id))
    }

    /// Key for a parameterized collection query.
    ///
    /// Parameters are sorted so equivalent queries always produce the same
    /// key regardless of call-site argument order.
    pub fn query(kind: ResourceKind, params: &BTreeMap<String, String>) -> Self {
        if params.is_empty() {
            return Self::collection(kind);
        }

        let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        Self(format!("{}?{}", kind.prefix(), query.join("&")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
