pub mod error;
pub mod json;
pub mod options;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use options::OptionItem;
