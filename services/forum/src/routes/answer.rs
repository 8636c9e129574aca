//! Answer endpoints

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
use crate::state::AppState;

/// Request for posting an answer
#[derive(Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Request for editing an answer
#[derive(Deserialize)]
pub struct AnswerEditRequest {
    pub content: String,
}

/// Response for answer mutations
#[derive(Serialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub status: String,
}

/// Response listing an answer together with its question's content
#[derive(Serialize)]
pub struct AnswerDetailsResponse {
    pub id: Uuid,
    pub question_content: String,
    pub answer_content: String,
}

/// Post an answer to a question
pub async fn create_answer(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ForumError> {
    let answer = state
        .answer_service
        .create(authorization.token(), question_id, payload.answer)
        .await?;

    let response = AnswerResponse {
        id: answer.id,
        status: "ANSWER CREATED".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Edit an answer. Only the owner can edit.
pub async fn edit_answer(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    Json(payload): Json<AnswerEditRequest>,
) -> Result<impl IntoResponse, ForumError> {
    let answer = state
        .answer_service
        .edit(authorization.token(), answer_id, payload.content)
        .await?;

    let response = AnswerResponse {
        id: answer.id,
        status: "ANSWER EDITED".to_string(),
    };
    Ok(Json(response))
}

/// Delete an answer. Only the owner or an admin can delete.
pub async fn delete_answer(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let answer = state
        .answer_service
        .delete(authorization.token(), answer_id)
        .await?;

    let response = AnswerResponse {
        id: answer.id,
        status: "ANSWER DELETED".to_string(),
    };
    Ok(Json(response))
}

/// Fetch all answers to a question
pub async fn get_all_answers(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, ForumError> {
    let (question, answers) = state
        .answer_service
        .all_by_question(authorization.token(), question_id)
        .await?;

    let response: Vec<AnswerDetailsResponse> = answers
        .into_iter()
        .map(|answer| AnswerDetailsResponse {
            id: answer.id,
            question_content: question.content.clone(),
            answer_content: answer.content,
        })
        .collect();
    Ok(Json(response))
}
