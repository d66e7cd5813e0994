use std::sync::Arc;

use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::IdentityClaims;
use super::claims::TokenClaims;
use super::config::SigningConfig;
use super::errors::JwtError;

/// Signing algorithm shared by issuer and validator.
pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly minted bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS (`header.payload.signature`)
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Mints HS256-signed tokens from authenticated identities.
pub struct TokenIssuer {
    config: Arc<SigningConfig>,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret());
        Self {
            config,
            encoding_key,
        }
    }

    /// Issue a token valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `MissingClaim` - Identity has no subject id
    /// * `InvalidConfiguration` - Expiry falls outside the representable range
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, identity: &IdentityClaims) -> Result<IssuedToken, JwtError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// `now` is truncated to whole seconds so `issued_at` and `expires_at`
    /// match the `iat` and `exp` claims exactly.
    pub fn issue_at(
        &self,
        identity: &IdentityClaims,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        if identity.subject.trim().is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        let now = now.trunc_subsecs(0);
        let expires_at = now
            .checked_add_signed(self.config.lifetime())
            .ok_or_else(|| {
                JwtError::InvalidConfiguration("token expiry is out of range".to_string())
            })?;
        let claims = TokenClaims {
            sub: identity.subject.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer().to_string(),
            aud: self.config.audience().to_string(),
        };

        let access_token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            subject = %claims.sub,
            role = %claims.role,
            expires_at = claims.exp,
            "Token issued"
        );

        Ok(IssuedToken {
            access_token,
            issued_at: now,
            expires_at,
        })
    }
}
