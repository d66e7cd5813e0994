use std::fmt;

use chrono::Duration;

use super::errors::JwtError;

/// Process-wide token signing settings.
///
/// Built once at startup and shared read-only (usually behind an `Arc`) by
/// [`TokenIssuer`](super::TokenIssuer) and [`TokenValidator`](super::TokenValidator).
/// Both sides must see the same value or every token fails validation.
#[derive(Clone)]
pub struct SigningConfig {
    secret: Vec<u8>,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl SigningConfig {
    /// Minimum HS256 key length in bytes.
    pub const MIN_SECRET_LEN: usize = 32;

    /// Token lifetime used by [`with_default_lifetime`](Self::with_default_lifetime).
    pub const DEFAULT_LIFETIME_MINUTES: i64 = 60;

    /// Upper bound on the token lifetime.
    pub const MAX_LIFETIME_DAYS: i64 = 365;

    /// Create a validated signing configuration.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes
    /// * `issuer` - Value written to and expected in the `iss` claim
    /// * `audience` - Value written to and expected in the `aud` claim
    /// * `lifetime` - Time between issue and expiry
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Secret too short, lifetime not positive or longer than a year
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(JwtError::InvalidConfiguration(format!(
                "secret must be at least {} bytes, got {}",
                Self::MIN_SECRET_LEN,
                secret.len()
            )));
        }

        if lifetime <= Duration::zero() {
            return Err(JwtError::InvalidConfiguration(
                "token lifetime must be positive".to_string(),
            ));
        }

        if lifetime > Duration::days(Self::MAX_LIFETIME_DAYS) {
            return Err(JwtError::InvalidConfiguration(format!(
                "token lifetime must not exceed {} days",
                Self::MAX_LIFETIME_DAYS
            )));
        }

        Ok(Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
            lifetime,
        })
    }

    /// Same as [`new`](Self::new) with the one hour default lifetime.
    pub fn with_default_lifetime(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, JwtError> {
        Self::new(
            secret,
            issuer,
            audience,
            Duration::minutes(Self::DEFAULT_LIFETIME_MINUTES),
        )
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"super-secret-key-with-minimum-32-characters";

    #[test]
    fn test_valid_config() {
        let config = SigningConfig::with_default_lifetime(SECRET, "test-issuer", "test-audience")
            .expect("Failed to build config");

        assert_eq!(config.issuer(), "test-issuer");
        assert_eq!(config.audience(), "test-audience");
        assert_eq!(config.lifetime(), Duration::hours(1));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = SigningConfig::with_default_lifetime(&b"too-short"[..], "iss", "aud");
        assert!(matches!(result, Err(JwtError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let result = SigningConfig::new(SECRET, "iss", "aud", Duration::zero());
        assert!(matches!(result, Err(JwtError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_oversized_lifetime_rejected() {
        let result = SigningConfig::new(SECRET, "iss", "aud", Duration::days(100_000_000));
        assert!(matches!(result, Err(JwtError::InvalidConfiguration(_))));

        let at_cap = SigningConfig::new(
            SECRET,
            "iss",
            "aud",
            Duration::days(SigningConfig::MAX_LIFETIME_DAYS),
        );
        assert!(at_cap.is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = SigningConfig::with_default_lifetime(SECRET, "iss", "aud").unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
