pub mod category_service;
pub mod client_service;
pub mod order_service;
pub mod reference_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use client_service::{ClientService, CreateClientRequest, UpdateClientRequest};
pub use order_service::{CreateOrderRequest, OrderService, UpdateOrderRequest};
pub use reference_service::{ReferenceDataService, WarmupReport};
pub use user_service::UserService;
