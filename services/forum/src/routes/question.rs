//! Question endpoints

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ForumError;
use crate::models::Question;
use crate::state::AppState;

/// Request carrying question content
#[derive(Deserialize)]
pub struct QuestionRequest {
    pub content: String,
}

/// Response for question mutations
#[derive(Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub status: String,
}

/// Response listing a question
#[derive(Serialize)]
pub struct QuestionDetailsResponse {
    pub id: Uuid,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            content: question.content,
        }
    }
}

/// Post a question
pub async fn create_question(
    State(state): State<AppState>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, ForumError> {
    let question = state
        .question_service
        .create(authorization.token(), payload.content)
        .await?;

    let response = QuestionResponse {
        id: question.id,
        status: "QUESTION CREATED".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch all questions posted by any user
pub async fn get_all_questions(
    State(state): State<AppState>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let questions = state.question_service.all(authorization.token()).await?;

    let response: Vec<QuestionDetailsResponse> =
        questions.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// Fetch all questions posted by a specific user
pub async fn get_all_questions_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let questions = state
        .question_service
        .all_by_user(authorization.token(), user_id)
        .await?;

    let response: Vec<QuestionDetailsResponse> =
        questions.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// Edit a question. Only the owner can edit.
pub async fn edit_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    Json(payload): Json<QuestionRequest>,
) -> Result<impl IntoResponse, ForumError> {
    let question = state
        .question_service
        .edit(authorization.token(), question_id, payload.content)
        .await?;

    let response = QuestionResponse {
        id: question.id,
        status: "QUESTION EDITED".to_string(),
    };
    Ok(Json(response))
}

/// Delete a question. Only the owner or an admin can delete.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let question = state
        .question_service
        .delete(authorization.token(), question_id)
        .await?;

    let response = QuestionResponse {
        id: question.id,
        status: "QUESTION DELETED".to_string(),
    };
    Ok(Json(response))
}
