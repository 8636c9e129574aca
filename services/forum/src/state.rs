//! Application state shared across handlers

use sqlx::PgPool;

use crate::services::{AnswerService, QuestionService, UserService};
use crate::stores::{PgAnswerStore, PgCredentialStore, PgQuestionStore, PgSessionStore};

/// User service wired to the PostgreSQL stores
pub type ForumUserService =
    UserService<PgCredentialStore, PgSessionStore, PgQuestionStore, PgAnswerStore>;
/// Question service wired to the PostgreSQL stores
pub type ForumQuestionService =
    QuestionService<PgCredentialStore, PgSessionStore, PgQuestionStore, PgAnswerStore>;
/// Answer service wired to the PostgreSQL stores
pub type ForumAnswerService =
    AnswerService<PgCredentialStore, PgSessionStore, PgQuestionStore, PgAnswerStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_service: ForumUserService,
    pub question_service: ForumQuestionService,
    pub answer_service: ForumAnswerService,
}
