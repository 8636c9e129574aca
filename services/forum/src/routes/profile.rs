//! User profile endpoint

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ForumError;
use crate::state::AppState;

/// Response carrying a user's profile details
#[derive(Serialize)]
pub struct UserDetailsResponse {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email_address: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

/// Fetch the profile of any user. Open to all authenticated users.
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let user = state
        .user_service
        .get_profile(authorization.token(), user_id)
        .await?;

    let response = UserDetailsResponse {
        first_name: user.first_name,
        last_name: user.last_name,
        user_name: user.username,
        email_address: user.email,
        country: user.country,
        about_me: user.about_me,
        dob: user.dob,
        contact_number: user.contact_number,
    };
    Ok(Json(response))
}
