use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is required")]
    InvalidInput,

    #[error("Stored password secret is malformed: {0}")]
    MalformedSecret(String),
}
