use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Closed set of roles carried in the `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Authenticated identity carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Subject (user identifier)
    pub subject: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl IdentityClaims {
    pub fn new(
        subject: impl ToString,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            username: username.into(),
            email: email.into(),
            role,
        }
    }
}

/// Wire payload of an issued token.
///
/// Every field is required; a token missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

impl TokenClaims {
    /// Whether the token is expired at `current_timestamp`.
    ///
    /// A token is no longer valid at the exact expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims {
            subject: self.sub.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl From<TokenClaims> for IdentityClaims {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.sub,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        }
    }
}
