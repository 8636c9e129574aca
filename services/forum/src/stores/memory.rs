//! In-memory store family
//!
//! Backs the test suite and any store-free deployment experiments. Each
//! store keeps its rows behind an `Arc<Mutex<..>>` so clones share state the
//! same way pooled Pg adapters do. The session map is keyed by access token,
//! which enforces token uniqueness exactly where the Pg adapter's unique
//! index does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{Answer, NewAnswer, NewQuestion, NewSession, NewUser, Question, Role, Session, User};

use super::{AnswerStore, CredentialStore, QuestionStore, SessionStore};

/// Credential store held in process memory
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a user's role in place. Test hook for promotion flows; the
    /// registration path always persists `Role::User`.
    pub async fn set_role(&self, id: Uuid, role: Role) -> bool {
        let mut users = self.users.lock().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn save(&self, new_user: NewUser) -> DatabaseResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            country: new_user.country,
            about_me: new_user.about_me,
            dob: new_user.dob,
            contact_number: new_user.contact_number,
            created_at: Utc::now(),
        };

        let mut users = self.users.lock().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut users = self.users.lock().await;
        Ok(users.remove(&id).is_some())
    }
}

/// Session store held in process memory, keyed by access token
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<Session>> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(token).cloned())
    }

    async fn save(&self, new_session: NewSession) -> DatabaseResult<Session> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&new_session.access_token) {
            return Err(DatabaseError::Query(sqlx::Error::Protocol(
                "duplicate access token".into(),
            )));
        }

        let session = Session {
            id: Uuid::new_v4(),
            user_id: new_session.user_id,
            access_token: new_session.access_token.clone(),
            issued_at: new_session.issued_at,
            expires_at: new_session.expires_at,
            logged_out_at: None,
        };
        sessions.insert(session.access_token.clone(), session.clone());
        Ok(session)
    }

    async fn record_logout(
        &self,
        token: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Session>> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.get_mut(token).map(|session| {
            session.logged_out_at = Some(at);
            session.clone()
        }))
    }

    async fn revoke_all_for_user(&self, user_id: Uuid, at: DateTime<Utc>) -> DatabaseResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut revoked = 0;
        for session in sessions.values_mut() {
            if session.user_id == user_id && session.logged_out_at.is_none() {
                session.logged_out_at = Some(at);
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

/// Question store held in process memory
#[derive(Clone, Default)]
pub struct MemoryQuestionStore {
    questions: Arc<Mutex<HashMap<Uuid, Question>>>,
}

impl MemoryQuestionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut questions: Vec<Question>) -> Vec<Question> {
    questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    questions
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn save(&self, new_question: NewQuestion) -> DatabaseResult<Question> {
        let now = Utc::now();
        let question = Question {
            id: Uuid::new_v4(),
            author_id: new_question.author_id,
            content: new_question.content,
            created_at: now,
            updated_at: now,
        };

        let mut questions = self.questions.lock().await;
        questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Question>> {
        let questions = self.questions.lock().await;
        Ok(questions.get(&id).cloned())
    }

    async fn all(&self) -> DatabaseResult<Vec<Question>> {
        let questions = self.questions.lock().await;
        Ok(newest_first(questions.values().cloned().collect()))
    }

    async fn all_by_author(&self, author_id: Uuid) -> DatabaseResult<Vec<Question>> {
        let questions = self.questions.lock().await;
        Ok(newest_first(
            questions
                .values()
                .filter(|q| q.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Question>> {
        let mut questions = self.questions.lock().await;
        Ok(questions.get_mut(&id).map(|question| {
            question.content = content.to_string();
            question.updated_at = at;
            question.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut questions = self.questions.lock().await;
        Ok(questions.remove(&id).is_some())
    }

    async fn delete_by_author(&self, author_id: Uuid) -> DatabaseResult<u64> {
        let mut questions = self.questions.lock().await;
        let before = questions.len();
        questions.retain(|_, q| q.author_id != author_id);
        Ok((before - questions.len()) as u64)
    }
}

/// Answer store held in process memory
#[derive(Clone, Default)]
pub struct MemoryAnswerStore {
    answers: Arc<Mutex<HashMap<Uuid, Answer>>>,
}

impl MemoryAnswerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnswerStore for MemoryAnswerStore {
    async fn save(&self, new_answer: NewAnswer) -> DatabaseResult<Answer> {
        let now = Utc::now();
        let answer = Answer {
            id: Uuid::new_v4(),
            author_id: new_answer.author_id,
            question_id: new_answer.question_id,
            content: new_answer.content,
            created_at: now,
            updated_at: now,
        };

        let mut answers = self.answers.lock().await;
        answers.insert(answer.id, answer.clone());
        Ok(answer)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Answer>> {
        let answers = self.answers.lock().await;
        Ok(answers.get(&id).cloned())
    }

    async fn all_by_question(&self, question_id: Uuid) -> DatabaseResult<Vec<Answer>> {
        let answers = self.answers.lock().await;
        let mut matching: Vec<Answer> = answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching)
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Answer>> {
        let mut answers = self.answers.lock().await;
        Ok(answers.get_mut(&id).map(|answer| {
            answer.content = content.to_string();
            answer.updated_at = at;
            answer.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut answers = self.answers.lock().await;
        Ok(answers.remove(&id).is_some())
    }

    async fn delete_by_question(&self, question_id: Uuid) -> DatabaseResult<u64> {
        let mut answers = self.answers.lock().await;
        let before = answers.len();
        answers.retain(|_, a| a.question_id != question_id);
        Ok((before - answers.len()) as u64)
    }

    async fn delete_by_author(&self, author_id: Uuid) -> DatabaseResult<u64> {
        let mut answers = self.answers.lock().await;
        let before = answers.len();
        answers.retain(|_, a| a.author_id != author_id);
        Ok((before - answers.len()) as u64)
    }
}
