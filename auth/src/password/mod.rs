pub mod errors;
pub mod pbkdf2;
pub mod secret;

pub use self::errors::PasswordError;
pub use self::pbkdf2::PasswordHasher;
pub use self::secret::PasswordSecret;
