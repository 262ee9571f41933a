pub mod fetch;
pub mod logging;
pub mod repositories;
pub mod services;
pub mod supabase;
