//! Answer service

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::{Authenticator, Capability, authorize};
use crate::error::{ForumError, ForumResult};
use crate::models::{Answer, NewAnswer, Question};
use crate::stores::{AnswerStore, CredentialStore, QuestionStore, SessionStore};

fn answer_not_found() -> ForumError {
    ForumError::AnswerNotFound {
        message: "Entered answer uuid does not exist".to_string(),
    }
}

/// Answer service over injected store handles
#[derive(Clone)]
pub struct AnswerService<C, S, Q, A> {
    questions: Q,
    answers: A,
    authenticator: Authenticator<C, S>,
}

impl<C, S, Q, A> AnswerService<C, S, Q, A>
where
    C: CredentialStore + Clone,
    S: SessionStore + Clone,
    Q: QuestionStore,
    A: AnswerStore,
{
    /// Create a new answer service
    pub fn new(credentials: C, sessions: S, questions: Q, answers: A) -> Self {
        let authenticator = Authenticator::new(credentials, sessions);
        Self {
            questions,
            answers,
            authenticator,
        }
    }

    /// Post an answer to a question. Open to all authenticated users.
    pub async fn create(
        &self,
        token: &str,
        question_id: Uuid,
        content: String,
    ) -> ForumResult<Answer> {
        let principal = self
            .authenticator
            .authenticate(token, Some("post an answer"))
            .await?;

        if self.questions.find_by_id(question_id).await?.is_none() {
            return Err(ForumError::QuestionNotFound {
                message: "The question entered is invalid".to_string(),
            });
        }

        let answer = self
            .answers
            .save(NewAnswer {
                author_id: principal.id(),
                question_id,
                content,
            })
            .await?;

        info!("Created answer {}", answer.id);
        Ok(answer)
    }

    /// Edit an answer's content. Owner only.
    ///
    /// Ownership compares the answer's stored author identity against the
    /// principal, never anything carried on the request.
    pub async fn edit(&self, token: &str, answer_id: Uuid, content: String) -> ForumResult<Answer> {
        let principal = self
            .authenticator
            .authenticate(token, Some("edit an answer"))
            .await?;

        let answer = self
            .answers
            .find_by_id(answer_id)
            .await?
            .ok_or_else(answer_not_found)?;

        authorize(&principal, Capability::ResourceOwnerOnly, Some(answer.author_id)).map_err(
            |_| ForumError::Forbidden {
                message: "Only the answer owner can edit the answer".to_string(),
            },
        )?;

        self.answers
            .update_content(answer_id, &content, Utc::now())
            .await?
            .ok_or_else(answer_not_found)
    }

    /// Delete an answer. Owner or admin.
    pub async fn delete(&self, token: &str, answer_id: Uuid) -> ForumResult<Answer> {
        let principal = self
            .authenticator
            .authenticate(token, Some("delete an answer"))
            .await?;

        let answer = self
            .answers
            .find_by_id(answer_id)
            .await?
            .ok_or_else(answer_not_found)?;

        authorize(&principal, Capability::OwnerOrAdmin, Some(answer.author_id)).map_err(|_| {
            ForumError::Forbidden {
                message: "Only the answer owner or admin can delete the answer".to_string(),
            }
        })?;

        self.answers.delete(answer_id).await?;

        info!("Deleted answer {}", answer.id);
        Ok(answer)
    }

    /// All answers to a question, together with the question itself.
    /// Open to all authenticated users.
    pub async fn all_by_question(
        &self,
        token: &str,
        question_id: Uuid,
    ) -> ForumResult<(Question, Vec<Answer>)> {
        self.authenticator
            .authenticate(token, Some("get the answers"))
            .await?;

        let question = self.questions.find_by_id(question_id).await?.ok_or_else(|| {
            ForumError::QuestionNotFound {
                message: "The question with entered uuid whose details are to be seen does not exist"
                    .to_string(),
            }
        })?;

        let answers = self.answers.all_by_question(question_id).await?;
        Ok((question, answers))
    }
}
