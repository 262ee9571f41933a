//! Fetch coordination domain - typed cache keys, invalidation signals and
//! batch queries

mod batch;
mod key;
mod signal;

pub use batch::batch_fetch;
pub use key::{FetchKey, ResourceKind};
pub use signal::InvalidationSignal;
