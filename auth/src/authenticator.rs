use std::sync::Arc;

use crate::authorization::authorize;
use crate::authorization::AuthorizationError;
use crate::authorization::Policy;
use crate::jwt::IdentityClaims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::SigningConfig;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordSecret;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Issuer and validator are built from the same [`SigningConfig`], so tokens
/// minted here always validate here.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl From<IssuedToken> for AuthenticationResult {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            expires_at: token.expires_at,
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

/// Outcome of gating a request on a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Token failed validation; surfaces as unauthenticated.
    #[error("Token rejected: {0}")]
    Rejected(#[from] JwtError),

    #[error(transparent)]
    Denied(#[from] AuthorizationError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Signing configuration shared by issuer and validator
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(Arc::clone(&config)),
            token_validator: TokenValidator::new(config),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `InvalidInput` - No password was supplied
    pub fn hash_password<'a>(
        &self,
        password: impl Into<Option<&'a str>>,
    ) -> Result<PasswordSecret, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored secret.
    ///
    /// # Errors
    /// * `MalformedSecret` - Stored secret is corrupt
    pub fn verify_password(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_secret` - Stored password secret
    /// * `identity` - Identity to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored secret is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_secret: &str,
        identity: &IdentityClaims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_secret)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self.token_issuer.issue(identity)?;

        Ok(token.into())
    }

    /// Generate a token without password verification.
    pub fn issue_token(&self, identity: &IdentityClaims) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(identity)
    }

    /// Validate a token and recover its identity.
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        self.token_validator.validate(token)
    }

    /// Validate `token` and check it against `policy`.
    ///
    /// # Errors
    /// * `Rejected` - Token is malformed, forged, expired or for another issuer/audience
    /// * `Denied` - Token is valid but the role does not satisfy the policy
    pub fn authorize_token(
        &self,
        token: &str,
        policy: Policy,
    ) -> Result<IdentityClaims, AccessError> {
        let claims = self.token_validator.validate(token)?;
        authorize(Some(&claims), policy)?;
        Ok(claims)
    }
}
