use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Longest access token lifetime a deployment may configure (one year).
pub const MAX_ACCESS_TOKEN_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Longest refresh token validity a deployment may configure (ten years).
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub polka: PolkaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Default and upper bound of a client-requested access token lifetime.
    pub access_token_max_seconds: i64,
    pub refresh_token_days: i64,
    /// Reject `Authorization` headers whose scheme keyword is not the
    /// expected one (`Bearer` / `ApiKey`).
    pub strict_authorization_scheme: bool,
}

// Secrets are never printed, even in debug output.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_token_max_seconds", &self.access_token_max_seconds)
            .field("refresh_token_days", &self.refresh_token_days)
            .field(
                "strict_authorization_scheme",
                &self.strict_authorization_scheme,
            )
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

impl fmt::Debug for PolkaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolkaConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__JWT_SECRET, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__JWT_SECRET=... overrides auth.jwt_secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set".to_string(),
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_SECONDS).contains(&self.auth.access_token_max_seconds) {
            return Err(ConfigError::Message(format!(
                "auth.access_token_max_seconds must be between 1 and {}",
                MAX_ACCESS_TOKEN_SECONDS
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_DAYS).contains(&self.auth.refresh_token_days) {
            return Err(ConfigError::Message(format!(
                "auth.refresh_token_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_DAYS
            )));
        }
        Ok(())
    }
}
