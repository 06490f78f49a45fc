//! API configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `claims.toml` in the working directory, then `CLAIMS_*` environment
//! variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Where adjudicated claims are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Value every `/claims` request must carry in `X-API-Key`
    pub api_key: String,
    /// Database URL
    pub database_url: String,
    /// Claim store backend
    pub storage: StorageBackend,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
    /// JSON reference data file; the seeded tables are used when unset
    pub reference_data_path: Option<String>,
    /// Maximum database pool size
    pub db_max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_key: "dev-test-api-key".to_string(),
            database_url: "postgres://localhost/claims".to_string(),
            storage: StorageBackend::Postgres,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            reference_data_path: None,
            db_max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from defaults, `claims.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value has the wrong type
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("claims").required(false))
            .add_source(Environment::with_prefix("CLAIMS"))
            .build()?
            .try_deserialize()
    }

    /// A builder seeded with the default values
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("api_key", defaults.api_key)?
            .set_default("database_url", defaults.database_url)?
            .set_default("storage", "postgres")?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: ApiConfig = ApiConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key, "dev-test-api-key");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.reference_data_path.is_none());
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_apply() {
        let config: ApiConfig = ApiConfig::defaults()
            .unwrap()
            .set_override("storage", "memory")
            .unwrap()
            .set_override("port", "9090")
            .unwrap()
            .set_override("reference_data_path", "/etc/claims/reference.json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.reference_data_path.as_deref(),
            Some("/etc/claims/reference.json")
        );
    }

    #[test]
    fn test_unknown_storage_is_error() {
        let result = ApiConfig::defaults()
            .unwrap()
            .set_override("storage", "sqlite")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<ApiConfig>();

        assert!(result.is_err());
    }
}
