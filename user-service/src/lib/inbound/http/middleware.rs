use auth::AccessError;
use auth::AuthorizationError;
use auth::IdentityClaims;
use auth::Policy;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: IdentityClaims,
}

/// Any valid token is accepted.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize_request(&state, Policy::Authenticated, req, next).await
}

/// Only tokens carrying the `Admin` role are accepted.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize_request(&state, Policy::ADMIN_ONLY, req, next).await
}

/// Validate the bearer token, apply the policy and attach the caller to the request.
///
/// Rejected tokens yield 401, a valid token with the wrong role yields 403.
async fn authorize_request(
    state: &AppState,
    policy: Policy,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state
        .authenticator
        .authorize_token(token, policy)
        .map_err(access_error)?;

    let user_id = UserId::from_string(&claims.subject).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse user ID from token");
        ApiError::Unauthorized("Invalid token format".to_string())
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id, claims });

    Ok(next.run(req).await)
}

/// Map a failed access check to 401 (no usable identity) or 403 (wrong role).
fn access_error(err: AccessError) -> ApiError {
    match err {
        AccessError::Rejected(reason) => {
            tracing::warn!(reason = %reason, "JWT validation failed");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        }
        // `authorize_token` always presents claims; kept so the match stays exhaustive.
        AccessError::Denied(AuthorizationError::Unauthenticated) => {
            ApiError::Unauthorized("Authentication required".to_string())
        }
        AccessError::Denied(denied @ AuthorizationError::Forbidden { .. }) => {
            tracing::warn!(reason = %denied, "Authorization denied");
            ApiError::Forbidden("Insufficient role".to_string())
        }
    }
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
