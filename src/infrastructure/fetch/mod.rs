//! Fetch infrastructure - the SWR cache and the invalidation coordinator

mod coordinator;
mod swr;

pub use coordinator::{InvalidationBus, InvalidationCoordinator};
pub use swr::{FetchOptions, FetchOutcome, SwrCache};
