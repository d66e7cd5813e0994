use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Password;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub message: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError> {
    let new_password = Password::new(req.new_password).map_err(UserError::from)?;

    state
        .user_service
        .change_password(
            &current.user_id,
            ChangePasswordCommand {
                old_password: req.old_password,
                new_password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChangePasswordResponseData {
            message: "Password updated successfully".to_string(),
        },
    ))
}
