//! Registration and session lifecycle endpoints

use axum::{
    Json,
    extract::State,
    http::{HeaderName, StatusCode},
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ForumError;
use crate::services::Registration;
use crate::state::AppState;

/// Request for user registration
#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

/// Response for user registration
#[derive(Serialize)]
pub struct SignupResponse {
    pub id: Uuid,
    pub status: String,
}

/// Request for sign-in
#[derive(Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Response for sign-in; the minted token travels in the `access-token`
/// response header.
#[derive(Serialize)]
pub struct SigninResponse {
    pub id: Uuid,
    pub message: String,
}

/// Response for sign-out
#[derive(Serialize)]
pub struct SignoutResponse {
    pub id: Uuid,
    pub message: String,
}

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ForumError> {
    let user = state
        .user_service
        .register(Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            country: payload.country,
            about_me: payload.about_me,
            dob: payload.dob,
            contact_number: payload.contact_number,
        })
        .await?;

    let response = SignupResponse {
        id: user.id,
        status: "USER SUCCESSFULLY REGISTERED".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in and mint a fresh session
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<impl IntoResponse, ForumError> {
    let session = state
        .user_service
        .sign_in(&payload.username, &payload.password)
        .await?;

    let response = SigninResponse {
        id: session.user_id,
        message: "SIGNED IN SUCCESSFULLY".to_string(),
    };
    Ok((
        [(
            HeaderName::from_static("access-token"),
            session.access_token,
        )],
        Json(response),
    ))
}

/// Sign the presented session out
pub async fn signout(
    State(state): State<AppState>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let session = state.user_service.sign_out(authorization.token()).await?;

    let response = SignoutResponse {
        id: session.user_id,
        message: "SIGNED OUT SUCCESSFULLY".to_string(),
    };
    Ok(Json(response))
}
