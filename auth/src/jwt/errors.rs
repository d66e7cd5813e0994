use thiserror::Error;

/// Error type for JWT operations.
///
/// Rejection variants stay distinct so callers can log the exact reason,
/// even though all of them surface as "unauthenticated".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid signing configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer does not match")]
    IssuerMismatch,

    #[error("Token audience does not match")]
    AudienceMismatch,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::BadSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidIssuer => JwtError::IssuerMismatch,
            ErrorKind::InvalidAudience => JwtError::AudienceMismatch,
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}
