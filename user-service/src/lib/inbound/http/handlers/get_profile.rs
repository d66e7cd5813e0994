use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::NaiveDate;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Address;
use crate::domain::user::models::Profile;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .user_service
        .get_profile(&current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|(ref user, ref profile)| {
            ApiSuccess::new(StatusCode::OK, ProfileData::new(user, profile))
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressData {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl From<&Address> for AddressData {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub username: String,
    pub email: String,
    pub address: AddressData,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
}

impl ProfileData {
    pub fn new(user: &User, profile: &Profile) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            address: (&profile.address).into(),
            phone_number: profile.phone_number.clone(),
            date_of_birth: profile.date_of_birth,
            bio: profile.bio.clone(),
        }
    }
}
