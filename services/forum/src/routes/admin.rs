//! Admin moderation endpoints

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ForumError;
use crate::state::AppState;

/// Response for user deletion
#[derive(Serialize)]
pub struct UserDeleteResponse {
    pub id: Uuid,
    pub status: String,
}

/// Delete a user from the forum. Only an admin is authorized.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let user = state
        .user_service
        .delete_user(authorization.token(), user_id)
        .await?;

    let response = UserDeleteResponse {
        id: user.id,
        status: "USER SUCCESSFULLY DELETED".to_string(),
    };
    Ok(Json(response))
}
