//! User service configuration.
//!
//! Built once at startup and handed to the collaborators that need it.
//! Later changes to the environment are not observed.

use std::env;
use std::str::FromStr;

use common::{BasicAuthConfig, DatabaseConfig, LogConfig};

/// Default base path advertised by the API documentation
pub const DEFAULT_DOCS_BASE_PATH: &str = "/atmail";

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub auth: BasicAuthConfig,
    /// Server URL in the OpenAPI document; routes do not move with it
    pub docs_base_path: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let db_defaults = DatabaseConfig::default();
        let log_defaults = LogConfig::default();
        let auth_defaults = BasicAuthConfig::default();

        Self {
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                user: get("DB_USER").unwrap_or(db_defaults.user),
                password: get("DB_PASSWORD").unwrap_or(db_defaults.password),
                host: get("DB_HOST").unwrap_or(db_defaults.host),
                port: parse_or(get("DB_PORT"), db_defaults.port),
                name: get("DB_NAME").unwrap_or(db_defaults.name),
                max_connections: parse_or(get("DB_MAX_CONNECTIONS"), db_defaults.max_connections),
                min_connections: parse_or(get("DB_MIN_CONNECTIONS"), db_defaults.min_connections),
                log_queries: get("DB_HAS_LOG")
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(db_defaults.log_queries),
            },
            log: LogConfig {
                debug: get("ENABLE_DEBUG_LOG")
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(log_defaults.debug),
                info_file: get("LOG_INFO_DIR").unwrap_or(log_defaults.info_file),
                debug_file: get("LOG_DEBUG_DIR").unwrap_or(log_defaults.debug_file),
                warn_file: get("LOG_WARN_DIR").unwrap_or(log_defaults.warn_file),
                error_file: get("LOG_ERROR_DIR").unwrap_or(log_defaults.error_file),
            },
            auth: BasicAuthConfig {
                username: get("AUTH_USERNAME").unwrap_or(auth_defaults.username),
                password: get("AUTH_PASSWORD").unwrap_or(auth_defaults.password),
            },
            docs_base_path: get("SWAGGER_HOST")
                .unwrap_or_else(|| DEFAULT_DOCS_BASE_PATH.to_string()),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            log: LogConfig::default(),
            auth: BasicAuthConfig::default(),
            docs_base_path: DEFAULT_DOCS_BASE_PATH.to_string(),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Boolean spellings accepted for flags.
fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
