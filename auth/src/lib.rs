//! Credential and token management
//!
//! Provides the authentication core consumed by the user service:
//! - Password hashing (PBKDF2-HMAC-SHA256, random per-secret salt)
//! - JWT token issuing and validation (HS256, issuer/audience bound)
//! - Role based authorization decisions
//!
//! Everything here is synchronous and free of I/O. The only shared state is
//! the immutable [`SigningConfig`], built once at startup.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let secret = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", secret.as_str()).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{IdentityClaims, Role, SigningConfig, TokenIssuer, TokenValidator};
//!
//! let config = Arc::new(
//!     SigningConfig::with_default_lifetime(
//!         &b"secret_key_at_least_32_bytes_long!"[..],
//!         "user-service",
//!         "user-service-clients",
//!     )
//!     .unwrap(),
//! );
//! let issuer = TokenIssuer::new(Arc::clone(&config));
//! let validator = TokenValidator::new(config);
//!
//! let identity = IdentityClaims::new("user123", "alice", "alice@example.com", Role::User);
//! let token = issuer.issue(&identity).unwrap();
//! let decoded = validator.validate(&token.access_token).unwrap();
//! assert_eq!(decoded, identity);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, IdentityClaims, Policy, Role, SigningConfig};
//!
//! let config = SigningConfig::with_default_lifetime(
//!     &b"secret_key_at_least_32_bytes_long!"[..],
//!     "user-service",
//!     "user-service-clients",
//! )
//! .unwrap();
//! let auth = Authenticator::new(Arc::new(config));
//!
//! // Register: hash password
//! let secret = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = IdentityClaims::new("user123", "alice", "alice@example.com", Role::User);
//! let result = auth.authenticate("password123", secret.as_str(), &identity).unwrap();
//!
//! // Protected request: validate and authorize
//! let claims = auth.authorize_token(&result.access_token, Policy::USER_ONLY).unwrap();
//! assert_eq!(claims.role, Role::User);
//! ```

pub mod authenticator;
pub mod authorization;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AccessError;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authorization::authorize;
pub use authorization::AuthorizationError;
pub use authorization::Policy;
pub use jwt::IdentityClaims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::Role;
pub use jwt::SigningConfig;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordSecret;
