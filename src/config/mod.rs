//! Application configuration module
//!
//! Configuration is read from environment variables with the
//! `EMPLOYEE_DIRECTORY` prefix; nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use employee_directory::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod rate_limit;
mod redis;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use rate_limit::{RateLimitConfig, StoreFailurePolicy};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub redis: RedisConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads variables with the `EMPLOYEE_DIRECTORY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `EMPLOYEE_DIRECTORY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EMPLOYEE_DIRECTORY__RATE_LIMIT__WINDOW_SECS=60` -> `rate_limit.window_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EMPLOYEE_DIRECTORY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// [`load`](Self::load) followed by [`validate`](Self::validate).
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "EMPLOYEE_DIRECTORY__DATABASE__URL",
        "EMPLOYEE_DIRECTORY__REDIS__URL",
        "EMPLOYEE_DIRECTORY__SERVER__PORT",
        "EMPLOYEE_DIRECTORY__SERVER__ENVIRONMENT",
        "EMPLOYEE_DIRECTORY__RATE_LIMIT__REQUESTS_PER_WINDOW",
        "EMPLOYEE_DIRECTORY__RATE_LIMIT__ON_STORE_ERROR",
    ];

    fn set_minimal_env() {
        env::set_var(
            "EMPLOYEE_DIRECTORY__DATABASE__URL",
            "postgresql://test@localhost/directory",
        );
        env::set_var("EMPLOYEE_DIRECTORY__REDIS__URL", "redis://localhost:6379");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn with_env<T>(extra: &[(&str, &str)], load: impl FnOnce() -> T) -> T {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = load();
        clear_env();
        result
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        with_env(extra, AppConfig::load)
    }

    #[test]
    fn loads_required_sections_from_environment() {
        let config = load_with(&[]).expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/directory");
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn omitted_sections_take_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.rate_limit.requests_per_window, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.on_store_error, StoreFailurePolicy::FailClosed);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load_with(&[
            ("EMPLOYEE_DIRECTORY__SERVER__PORT", "3000"),
            ("EMPLOYEE_DIRECTORY__SERVER__ENVIRONMENT", "production"),
            ("EMPLOYEE_DIRECTORY__RATE_LIMIT__REQUESTS_PER_WINDOW", "20"),
            ("EMPLOYEE_DIRECTORY__RATE_LIMIT__ON_STORE_ERROR", "fail_open"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.rate_limit.requests_per_window, 20);
        assert_eq!(config.rate_limit.on_store_error, StoreFailurePolicy::FailOpen);
    }

    #[test]
    fn load_validated_accepts_minimal_environment() {
        assert!(with_env(&[], AppConfig::load_validated).is_ok());
    }

    #[test]
    fn load_validated_reports_semantic_errors() {
        let err = with_env(
            &[("EMPLOYEE_DIRECTORY__RATE_LIMIT__REQUESTS_PER_WINDOW", "0")],
            AppConfig::load_validated,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationFailed(ValidationError::InvalidRateLimit(_))
        ));
    }
}
