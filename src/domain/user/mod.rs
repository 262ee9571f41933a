//! User domain

mod entity;
mod repository;

pub use entity::{User, UserRole};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::mock::MockUserRepository;
