// src/config.rs

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_DB_CONNECTIONS: u32 = 10;

/// Service settings, read from the environment (`.env` is loaded by `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// When unset, scenarios live in process memory.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.into(),
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_CONNECTIONS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.db_max_connections),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
