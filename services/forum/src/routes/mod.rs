//! Forum service routes
//!
//! Handlers decode DTOs, pull the bearer token off the Authorization
//! header, and delegate to the services. The literal `Bearer ` prefix is
//! stripped here; everything past it is the opaque token the core sees.

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::state::AppState;

pub mod admin;
pub mod answer;
pub mod profile;
pub mod question;
pub mod user;

/// Create the router for the forum service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/user/signup", post(user::signup))
        .route("/user/signin", post(user::signin))
        .route("/user/signout", post(user::signout))
        .route("/userprofile/:user_id", get(profile::get_user_profile))
        .route("/question/create", post(question::create_question))
        .route("/question/all", get(question::get_all_questions))
        .route("/question/all/:user_id", get(question::get_all_questions_by_user))
        .route("/question/edit/:question_id", put(question::edit_question))
        .route("/question/delete/:question_id", delete(question::delete_question))
        .route(
            "/question/:question_id/answer/create",
            post(answer::create_answer),
        )
        .route("/answer/edit/:answer_id", put(answer::edit_answer))
        .route("/answer/delete/:answer_id", delete(answer::delete_answer))
        .route("/answer/all/:question_id", get(answer::get_all_answers))
        .route("/admin/user/:user_id", delete(admin::delete_user))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "forum-service"
    }))
}
