//! Error taxonomy for the forum service
//!
//! Every expected failure is a value of [`ForumError`], carrying a stable
//! string code consumed by API clients. All variants are terminal and
//! non-retryable; none are recovered internally. Store lookups that
//! legitimately return "absent" are translated into the precise domain
//! variant by the services, never surfaced as a generic store error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the forum service
#[derive(Error, Debug)]
pub enum ForumError {
    /// No session exists for the presented token (`ATHR-001`)
    #[error("{message}")]
    Unauthenticated { message: String },

    /// The session has a logout on record (`ATHR-002`)
    #[error("{message}")]
    SessionExpired { message: String },

    /// Ownership/role check denied the action (`ATHR-003`)
    #[error("{message}")]
    Forbidden { message: String },

    /// Sign-in with an unknown username (`ATH-001`)
    #[error("User with email not found")]
    UnknownUser,

    /// Sign-in with a wrong password (`ATH-002`)
    #[error("Password Failed")]
    BadCredential,

    /// Sign-out without a matching session (`SGR-001`)
    #[error("User is not Signed in")]
    SignOutRestricted,

    /// Registration with a taken username (`SGR-001`)
    #[error("Try any other Username, this Username has already been taken")]
    DuplicateUsername,

    /// Registration with a taken email (`SGR-002`)
    #[error("This user has already been registered, try with any other emailId")]
    DuplicateEmail,

    /// Target user does not exist (`USR-001`)
    #[error("{message}")]
    UserNotFound { message: String },

    /// Target question does not exist (`QUES-001`)
    #[error("{message}")]
    QuestionNotFound { message: String },

    /// Target answer does not exist (`ANS-001`)
    #[error("{message}")]
    AnswerNotFound { message: String },

    /// Signup field validation failure (`VAL-001`)
    #[error("{0}")]
    Validation(String),

    /// Sign-in attempts exceeded the rate limit (`RATE-001`)
    #[error("Too many sign in attempts, try again later")]
    RateLimited,

    /// Infrastructure fault, propagated opaque
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Any other internal fault (hashing, token minting)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ForumError {
    /// Stable string code surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            ForumError::Unauthenticated { .. } => "ATHR-001",
            ForumError::SessionExpired { .. } => "ATHR-002",
            ForumError::Forbidden { .. } => "ATHR-003",
            ForumError::UnknownUser => "ATH-001",
            ForumError::BadCredential => "ATH-002",
            ForumError::SignOutRestricted | ForumError::DuplicateUsername => "SGR-001",
            ForumError::DuplicateEmail => "SGR-002",
            ForumError::UserNotFound { .. } => "USR-001",
            ForumError::QuestionNotFound { .. } => "QUES-001",
            ForumError::AnswerNotFound { .. } => "ANS-001",
            ForumError::Validation(_) => "VAL-001",
            ForumError::RateLimited => "RATE-001",
            ForumError::Database(_) | ForumError::Internal(_) => "SRV-001",
        }
    }

    /// The `ATHR-001` failure for a token with no session on record.
    pub fn not_signed_in() -> Self {
        ForumError::Unauthenticated {
            message: "User has not signed in".to_string(),
        }
    }

    /// The `ATHR-002` failure for a signed-out session. The action phrase
    /// varies per calling context ("post a question", "delete an answer",
    /// ...); without one the bare message is used.
    pub fn signed_out(action: Option<&str>) -> Self {
        let message = match action {
            Some(action) => format!("User is signed out.Sign in first to {}", action),
            None => "User is signed out".to_string(),
        };
        ForumError::SessionExpired { message }
    }
}

impl IntoResponse for ForumError {
    fn into_response(self) -> Response {
        let status = match &self {
            ForumError::UnknownUser
            | ForumError::BadCredential
            | ForumError::SignOutRestricted => StatusCode::UNAUTHORIZED,
            ForumError::DuplicateUsername | ForumError::DuplicateEmail => StatusCode::CONFLICT,
            ForumError::Unauthenticated { .. }
            | ForumError::SessionExpired { .. }
            | ForumError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ForumError::UserNotFound { .. }
            | ForumError::QuestionNotFound { .. }
            | ForumError::AnswerNotFound { .. } => StatusCode::NOT_FOUND,
            ForumError::Validation(_) => StatusCode::BAD_REQUEST,
            ForumError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ForumError::Database(_) | ForumError::Internal(_) => {
                tracing::error!("Infrastructure failure: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Infrastructure details stay in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "code": self.code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for forum results
pub type ForumResult<T> = Result<T, ForumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ForumError::not_signed_in().code(), "ATHR-001");
        assert_eq!(ForumError::signed_out(None).code(), "ATHR-002");
        assert_eq!(ForumError::UnknownUser.code(), "ATH-001");
        assert_eq!(ForumError::BadCredential.code(), "ATH-002");
        assert_eq!(ForumError::SignOutRestricted.code(), "SGR-001");
        assert_eq!(ForumError::DuplicateUsername.code(), "SGR-001");
        assert_eq!(ForumError::DuplicateEmail.code(), "SGR-002");
    }

    #[test]
    fn signed_out_message_carries_the_action_phrase() {
        let err = ForumError::signed_out(Some("post a question"));
        assert_eq!(
            err.to_string(),
            "User is signed out.Sign in first to post a question"
        );

        let bare = ForumError::signed_out(None);
        assert_eq!(bare.to_string(), "User is signed out");
    }

    #[test]
    fn not_signed_in_message_matches_contract() {
        assert_eq!(ForumError::not_signed_in().to_string(), "User has not signed in");
    }
}
