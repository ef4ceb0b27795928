//! Dashboard configuration

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// SQLite database file; in-memory storage when unset
    pub database_path: Option<String>,

    /// Simulated round trip applied to every registration
    pub registration_delay_ms: u64,

    /// Directory served under `/images`
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_path: None,
            registration_delay_ms: 1000,
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    /// Build the configuration from `HELMET_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("HELMET_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            database_path: lookup("HELMET_DATABASE").filter(|v| !v.is_empty()),
            registration_delay_ms: lookup("HELMET_REGISTER_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.registration_delay_ms),
            static_dir: lookup("HELMET_STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }

    pub fn registration_delay(&self) -> Duration {
        Duration::from_millis(self.registration_delay_ms)
    }
}
