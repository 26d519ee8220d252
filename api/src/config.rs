//! Environment-driven service configuration.

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite connection string.
    pub database_url: String,
    /// Secret for signing and verifying admin bearer tokens.
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("FORMBUILDER_BIND").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: env::var("FORMBUILDER_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:formbuilder.db?mode=rwc".into()),
            jwt_secret: env::var("FORMBUILDER_JWT_SECRET")
                .unwrap_or_else(|_| "formbuilder-secret-key-change-in-production".into()),
        }
    }
}

impl Default for Config {
    /// In-memory defaults, used by tests.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "sqlite::memory:".into(),
            jwt_secret: "test-secret".into(),
        }
    }
}
