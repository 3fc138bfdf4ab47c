/// Database configuration and connection management
pub mod database;

/// Default policy set loading from config.toml
pub mod policies;
