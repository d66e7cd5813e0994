use std::env;
use std::sync::Arc;

use auth::JwtError;
use auth::SigningConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_minutes() -> i64 {
    SigningConfig::DEFAULT_LIFETIME_MINUTES
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl JwtConfig {
    /// Build the immutable signing configuration shared by token issuing and validation.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Secret shorter than 32 bytes, or lifetime not positive or too long
    pub fn signing_config(&self) -> Result<Arc<SigningConfig>, JwtError> {
        let lifetime = chrono::Duration::try_minutes(self.expiration_minutes).ok_or_else(|| {
            JwtError::InvalidConfiguration(format!(
                "expiration_minutes out of range: {}",
                self.expiration_minutes
            ))
        })?;

        SigningConfig::new(
            self.secret.as_bytes(),
            self.issuer.as_str(),
            self.audience.as_str(),
            lifetime,
        )
        .map(Arc::new)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
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

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            issuer: "user-service".to_string(),
            audience: "user-service-clients".to_string(),
            expiration_minutes: 60,
        }
    }

    #[test]
    fn test_signing_config_from_jwt_section() {
        let signing = jwt_config("test-secret-key-for-jwt-signing-at-least-32-bytes")
            .signing_config()
            .expect("Failed to build signing config");

        assert_eq!(signing.issuer(), "user-service");
        assert_eq!(signing.audience(), "user-service-clients");
        assert_eq!(signing.lifetime(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let result = jwt_config("short").signing_config();
        assert!(matches!(result, Err(JwtError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_out_of_range_expiration_is_rejected() {
        let mut config = jwt_config("test-secret-key-for-jwt-signing-at-least-32-bytes");

        config.expiration_minutes = i64::MAX;
        assert!(matches!(
            config.signing_config(),
            Err(JwtError::InvalidConfiguration(_))
        ));

        config.expiration_minutes = 60 * 24 * 366;
        assert!(matches!(
            config.signing_config(),
            Err(JwtError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", jwt_config("test-secret-key-for-jwt-signing-at-least-32-bytes"));
        assert!(!debug.contains("test-secret-key"));
    }
}
