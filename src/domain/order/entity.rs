//! Order entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can still be modified
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A line item within an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub description: String,
    pub quantity: u32,
    /// Unit price in the smallest currency unit
    pub unit_price_cents: i64,
}

impl OrderItem {
    pub fn subtotal_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation(
                "Order item requires a description",
            ));
        }

        if self.quantity == 0 {
            return Err(DomainError::validation(
                "Order item quantity must be at least 1",
            ));
        }

        if self.unit_price_cents < 0 {
            return Err(DomainError::validation(
                "Order item price must not be negative",
            ));
        }

        Ok(())
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), DomainError> {
    items.iter().try_for_each(OrderItem::validate)
}

/// A print-shop order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order for a client
    pub fn new(client_id: impl Into<String>) -> Result<Self, DomainError> {
        let client_id = client_id.into();

        if client_id.trim().is_empty() {
            return Err(DomainError::validation("Order requires a client id"));
        }

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            category_id: None,
            status: OrderStatus::Pending,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Result<Self, DomainError> {
        validate_items(&items)?;
        self.items = items;
        Ok(self)
    }

    /// Total of all line items in the smallest currency unit
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(OrderItem::subtotal_cents).sum()
    }

    /// Move the order to a new status
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), DomainError> {
        if !self.status.is_open() && status != self.status {
            return Err(DomainError::validation(format!(
                "Order in status '{}' cannot transition to '{}'",
                self.status, status
            )));
        }

        self.status = status;
        self.touch();
        Ok(())
    }

    /// Replace the line items
    pub fn set_items(&mut self, items: Vec<OrderItem>) -> Result<(), DomainError> {
        if !self.status.is_open() {
            return Err(DomainError::validation(
                "Items can only be changed on an open order",
            ));
        }

        validate_items(&items)?;
        self.items = items;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
