//! Question service

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::{Authenticator, Capability, authorize};
use crate::error::{ForumError, ForumResult};
use crate::models::{NewQuestion, Question};
use crate::stores::{AnswerStore, CredentialStore, QuestionStore, SessionStore};

fn question_not_found() -> ForumError {
    ForumError::QuestionNotFound {
        message: "Entered question uuid does not exist".to_string(),
    }
}

/// Question service over injected store handles
#[derive(Clone)]
pub struct QuestionService<C, S, Q, A> {
    credentials: C,
    questions: Q,
    answers: A,
    authenticator: Authenticator<C, S>,
}

impl<C, S, Q, A> QuestionService<C, S, Q, A>
where
    C: CredentialStore + Clone,
    S: SessionStore + Clone,
    Q: QuestionStore,
    A: AnswerStore,
{
    /// Create a new question service
    pub fn new(credentials: C, sessions: S, questions: Q, answers: A) -> Self {
        let authenticator = Authenticator::new(credentials.clone(), sessions);
        Self {
            credentials,
            questions,
            answers,
            authenticator,
        }
    }

    /// Post a new question. Open to all authenticated users.
    pub async fn create(&self, token: &str, content: String) -> ForumResult<Question> {
        let principal = self
            .authenticator
            .authenticate(token, Some("post a question"))
            .await?;

        let question = self
            .questions
            .save(NewQuestion {
                author_id: principal.id(),
                content,
            })
            .await?;

        info!("Created question {}", question.id);
        Ok(question)
    }

    /// All questions posted by anyone. Open to all authenticated users.
    pub async fn all(&self, token: &str) -> ForumResult<Vec<Question>> {
        self.authenticator
            .authenticate(token, Some("get all questions"))
            .await?;

        Ok(self.questions.all().await?)
    }

    /// All questions posted by one user. Open to all authenticated users.
    pub async fn all_by_user(&self, token: &str, user_id: Uuid) -> ForumResult<Vec<Question>> {
        self.authenticator
            .authenticate(
                token,
                Some("get all questions posted by a specific user"),
            )
            .await?;

        if self.credentials.find_by_id(user_id).await?.is_none() {
            return Err(ForumError::UserNotFound {
                message: "User with entered uuid whose question details are to be seen does not exist"
                    .to_string(),
            });
        }

        Ok(self.questions.all_by_author(user_id).await?)
    }

    /// Edit a question's content. Owner only.
    pub async fn edit(&self, token: &str, question_id: Uuid, content: String) -> ForumResult<Question> {
        let principal = self
            .authenticator
            .authenticate(token, Some("edit the question"))
            .await?;

        let question = self
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(question_not_found)?;

        authorize(&principal, Capability::ResourceOwnerOnly, Some(question.author_id)).map_err(
            |_| ForumError::Forbidden {
                message: "Only the question owner can edit the question".to_string(),
            },
        )?;

        self.questions
            .update_content(question_id, &content, Utc::now())
            .await?
            .ok_or_else(question_not_found)
    }

    /// Delete a question. Owner or admin; answers under it go with it.
    pub async fn delete(&self, token: &str, question_id: Uuid) -> ForumResult<Question> {
        let principal = self
            .authenticator
            .authenticate(token, Some("delete a question"))
            .await?;

        let question = self
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(question_not_found)?;

        authorize(&principal, Capability::OwnerOrAdmin, Some(question.author_id)).map_err(|_| {
            ForumError::Forbidden {
                message: "Only the question owner or admin can delete the question".to_string(),
            }
        })?;

        self.answers.delete_by_question(question_id).await?;
        self.questions.delete(question_id).await?;

        info!("Deleted question {}", question.id);
        Ok(question)
    }
}
