use ::pbkdf2::pbkdf2_hmac;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;
use super::secret::PasswordSecret;

/// Random salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Derived hash length in bytes.
pub const HASH_SIZE: usize = 32;

/// PBKDF2 round count.
pub const ITERATIONS: u32 = 10_000;

/// Password hashing implementation.
///
/// PBKDF2-HMAC-SHA256 with a fresh random salt per secret. The stored form is
/// `base64(salt || hash)`, always decoding to `SALT_SIZE + HASH_SIZE` bytes.
///
/// Derivation is deliberately slow; callers on an async runtime should run it
/// off the reactor (e.g. `spawn_blocking`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Every call draws a new salt from the OS random source, so hashing the
    /// same password twice yields two different secrets.
    ///
    /// # Arguments
    /// * `password` - Plaintext password; `None` models an absent value
    ///
    /// # Returns
    /// Encoded secret ready for storage
    ///
    /// # Errors
    /// * `InvalidInput` - No password was supplied
    pub fn hash<'a>(
        &self,
        password: impl Into<Option<&'a str>>,
    ) -> Result<PasswordSecret, PasswordError> {
        let password = password.into().ok_or(PasswordError::InvalidInput)?;

        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);

        let hash = derive(password, &salt);

        let mut salt_and_hash = [0u8; SALT_SIZE + HASH_SIZE];
        salt_and_hash[..SALT_SIZE].copy_from_slice(&salt);
        salt_and_hash[SALT_SIZE..].copy_from_slice(&hash);

        Ok(PasswordSecret::from(STANDARD.encode(salt_and_hash)))
    }

    /// Verify a password against a stored secret.
    ///
    /// # Arguments
    /// * `candidate` - Plaintext password to verify
    /// * `stored` - Encoded secret produced by [`hash`](Self::hash)
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidInput` - No candidate password was supplied
    /// * `MalformedSecret` - Stored value is not base64 or has the wrong length
    pub fn verify<'a>(
        &self,
        candidate: impl Into<Option<&'a str>>,
        stored: &str,
    ) -> Result<bool, PasswordError> {
        let candidate = candidate.into().ok_or(PasswordError::InvalidInput)?;

        let decoded = STANDARD
            .decode(stored)
            .map_err(|e| PasswordError::MalformedSecret(e.to_string()))?;

        if decoded.len() != SALT_SIZE + HASH_SIZE {
            return Err(PasswordError::MalformedSecret(format!(
                "expected {} bytes, got {}",
                SALT_SIZE + HASH_SIZE,
                decoded.len()
            )));
        }

        let (salt, expected) = decoded.split_at(SALT_SIZE);
        let computed = derive(candidate, salt);

        Ok(computed.ct_eq(expected).into())
    }
}

fn derive(password: &str, salt: &[u8]) -> [u8; HASH_SIZE] {
    let mut hash = [0u8; HASH_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut hash);
    hash
}
