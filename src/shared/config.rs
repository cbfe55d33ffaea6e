// src/shared/config.rs
use std::str::FromStr;

use crate::auth::adapter::outgoing::jwt::JwtConfig;

/// Reads a raw variable by name. Production passes `std::env::var`; tests
/// pass a map.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} {reason}")]
    OutOfRange { key: &'static str, reason: String },
}

pub fn required(lookup: Lookup<'_>, key: &'static str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

pub fn parse_or<T: FromStr>(
    lookup: Lookup<'_>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

//
// ──────────────────────────────────────────────────────────
// Sections
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        // Budget VPS friendly: 4MB memory, 3 iterations, 1 thread
        Self {
            memory_kib: 4 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = lookup("RUST_ENV").unwrap_or_else(|| "development".to_string());

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(lookup, "PORT", 8080u16)?,
        };

        let database = DatabaseConfig {
            url: required(lookup, "DATABASE_URL")?,
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", 50u32)?,
            min_connections: parse_or(lookup, "DB_MIN_CONNECTIONS", 5u32)?,
            run_migrations: parse_or(lookup, "RUN_MIGRATIONS", false)?,
        };

        if database.max_connections == 0 {
            return Err(ConfigError::OutOfRange {
                key: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }

        if database.min_connections > database.max_connections {
            return Err(ConfigError::OutOfRange {
                key: "DB_MIN_CONNECTIONS",
                reason: "must not exceed DB_MAX_CONNECTIONS".to_string(),
            });
        }

        let defaults = Argon2Config::default();
        let argon2 = Argon2Config {
            memory_kib: parse_or(lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(lookup, "ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(lookup, "ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            environment,
            server,
            database,
            jwt: JwtConfig::from_lookup(lookup)?,
            argon2,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
