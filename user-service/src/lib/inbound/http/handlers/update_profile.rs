use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::get_profile::AddressData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Address;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::Profile;
use crate::domain::user::models::UpdateProfileCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for replacing the profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub address: AddressRequest,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        let phone_number = PhoneNumber::new(self.phone_number)?;

        Ok(UpdateProfileCommand {
            address: Address {
                street: self.address.street,
                city: self.address.city,
                postal_code: self.address.postal_code,
                country: self.address.country,
            },
            phone_number,
            date_of_birth: self.date_of_birth,
            bio: self.bio,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponseData {
    pub address: AddressData,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
}

impl From<&Profile> for UpdateProfileResponseData {
    fn from(profile: &Profile) -> Self {
        Self {
            address: (&profile.address).into(),
            phone_number: profile.phone_number.clone(),
            date_of_birth: profile.date_of_birth,
            bio: profile.bio.clone(),
        }
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<UpdateProfileResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_profile(&current.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
