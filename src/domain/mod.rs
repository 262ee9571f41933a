//! Domain layer - entities, repository traits and fetch coordination types

pub mod category;
pub mod client;
mod error;
pub mod fetch;
pub mod order;
pub mod user;

pub use category::{Category, CategoryRepository};
pub use client::{Client, ClientRepository, ClientStatus};
pub use error::DomainError;
pub use fetch::{batch_fetch, FetchKey, InvalidationSignal, ResourceKind};
pub use order::{Order, OrderItem, OrderQuery, OrderRepository, OrderStatus};
pub use user::{User, UserRepository, UserRole};
