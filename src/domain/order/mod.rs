//! Order domain

mod entity;
mod repository;

pub use entity::{Order, OrderItem, OrderStatus};
pub use repository::{OrderQuery, OrderRepository};

#[cfg(test)]
pub use repository::mock::MockOrderRepository;
