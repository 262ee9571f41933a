//! Repository implementations

mod in_memory;

pub use in_memory::{
    InMemoryCategoryRepository, InMemoryClientRepository, InMemoryOrderRepository,
    InMemoryUserRepository,
};
