/// Database configuration and connection management
pub mod database;

/// Service settings loaded from helpdesk.toml
pub mod settings;
