pub mod claims;
pub mod config;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::IdentityClaims;
pub use claims::Role;
pub use claims::RoleParseError;
pub use claims::TokenClaims;
pub use config::SigningConfig;
pub use errors::JwtError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
