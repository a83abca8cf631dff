/// Database configuration and connection management
pub mod database;

/// Application configuration loaded from config.toml
pub mod store;

pub use store::{AppConfig, CheckoutConfig, ServerConfig, StoreConfig, UnknownVariantPolicy};
