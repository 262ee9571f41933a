//! Category domain

mod entity;
mod repository;

pub use entity::Category;
pub use repository::CategoryRepository;

#[cfg(test)]
pub use repository::mock::MockCategoryRepository;
