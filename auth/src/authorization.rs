use thiserror::Error;

use crate::jwt::IdentityClaims;
use crate::jwt::Role;

/// Access policy attached to a protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Any successfully validated token.
    Authenticated,
    /// Validated token whose role claim equals the given role.
    RequireRole(Role),
}

impl Policy {
    pub const ADMIN_ONLY: Policy = Policy::RequireRole(Role::Admin);
    pub const USER_ONLY: Policy = Policy::RequireRole(Role::User);
}

/// Reason an operation was denied.
///
/// `Unauthenticated` maps to 401 and `Forbidden` to 403 at the HTTP edge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role {actual} does not satisfy required role {required}")]
    Forbidden { required: Role, actual: Role },
}

/// Decide whether the presented claims satisfy `policy`.
///
/// # Returns
/// The same claims when access is allowed
///
/// # Errors
/// * `Unauthenticated` - No claims were presented
/// * `Forbidden` - Claims are valid but the role does not match
pub fn authorize(
    claims: Option<&IdentityClaims>,
    policy: Policy,
) -> Result<&IdentityClaims, AuthorizationError> {
    let claims = claims.ok_or(AuthorizationError::Unauthenticated)?;

    match policy {
        Policy::Authenticated => Ok(claims),
        Policy::RequireRole(required) if claims.role == required => Ok(claims),
        Policy::RequireRole(required) => Err(AuthorizationError::Forbidden {
            required,
            actual: claims.role,
        }),
    }
}
