use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Encoded password secret as persisted alongside a user.
///
/// Holds the base64 encoding of `salt || hash`. The value is opaque to
/// callers; only [`PasswordHasher`](super::PasswordHasher) interprets it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordSecret(String);

impl PasswordSecret {
    /// Encoded representation, suitable for storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for PasswordSecret {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl AsRef<str> for PasswordSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Secrets never show up in logs, even in encoded form.
impl fmt::Debug for PasswordSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordSecret(<redacted>)")
    }
}
