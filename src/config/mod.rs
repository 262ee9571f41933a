mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, ServerConfig, SupabaseConfig,
};
