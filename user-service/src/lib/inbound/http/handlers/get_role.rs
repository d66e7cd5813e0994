use auth::Role;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the role carried by the presented token.
pub async fn get_role(
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<RoleData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        RoleData {
            role: current.claims.role,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleData {
    pub role: Role,
}
