//! Client domain

mod entity;
mod repository;

pub use entity::{Client, ClientStatus};
pub use repository::ClientRepository;

#[cfg(test)]
pub use repository::mock::MockClientRepository;
