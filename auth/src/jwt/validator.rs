use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::claims::TokenClaims;
use super::config::SigningConfig;
use super::errors::JwtError;
use super::issuer::ALGORITHM;

/// Verifies tokens minted by [`TokenIssuer`](super::TokenIssuer).
///
/// Validation is a pure function of the token, the signing configuration and
/// the supplied clock reading.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
        }
    }

    /// Validate a token against the current time.
    pub fn validate(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// The signature is verified before any claim is read.
    ///
    /// # Errors
    /// * `Malformed` - Not a well-formed token or required claims missing
    /// * `BadSignature` - Signature does not match the configured key
    /// * `IssuerMismatch` / `AudienceMismatch` - Claim differs from configuration
    /// * `Expired` - `now` is at or past the `exp` claim
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, JwtError> {
        self.inspect_at(token, now).map(IdentityClaims::from)
    }

    /// Decoded wire claims, including timestamps, after full validation.
    pub fn inspect_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, JwtError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
