//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::engine::DEFAULT_REPOSITORY_TIMEOUT_MS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of request results the engine cache can hold
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Deadline for each repository call, in milliseconds
    pub repository_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Cached results kept (default: 100, minimum 1)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `REPOSITORY_TIMEOUT_MS` - Repository call deadline (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity).max(1),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            repository_timeout_ms: env_or("REPOSITORY_TIMEOUT_MS", defaults.repository_timeout_ms),
        }
    }

    pub fn repository_timeout(&self) -> Duration {
        Duration::from_millis(self.repository_timeout_ms)
    }
}

/// Parses an environment variable, falling back to `default` when it is
/// missing or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            server_port: 8080,
            repository_timeout_ms: DEFAULT_REPOSITORY_TIMEOUT_MS,
        }
    }
}
