use std::env;

use auth::HashingCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Shortest signing secret accepted for HS256.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: HashingCost,
}

/// Postgres settings. Without a url the server keeps accounts in memory.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    pub expiration_minutes: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the server must not start with.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Secret is empty or shorter than
    ///   [`MIN_SECRET_BYTES`], or the token lifetime is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.jwt.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_minutes: i64) -> Config {
        Config {
            database: DatabaseConfig::default(),
            server: ServerConfig { http_port: 8000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_minutes,
            },
            password: HashingCost::default(),
        }
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        let config = config("test-secret-key-for-jwt-signing-at-least-32-bytes", 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        assert!(config("", 30).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        assert!(config("too-short", 30).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let secret = "test-secret-key-for-jwt-signing-at-least-32-bytes";
        assert!(config(secret, 0).validate().is_err());
        assert!(config(secret, -5).validate().is_err());
    }

    // The only test touching the process environment
    #[test]
    fn test_load_reads_environment_overrides() {
        env::set_var("JWT__SECRET", "test-secret-key-for-jwt-signing-at-least-32-bytes");
        env::set_var("SERVER__HTTP_PORT", "9123");

        let config = Config::load().expect("Failed to load configuration");

        assert_eq!(
            config.jwt.secret,
            "test-secret-key-for-jwt-signing-at-least-32-bytes"
        );
        assert_eq!(config.server.http_port, 9123);
        assert_eq!(config.jwt.expiration_minutes, 30);
    }
}
