//! Question store port and its PostgreSQL adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{NewQuestion, Question};

/// Port for question persistence.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Persist a new question.
    async fn save(&self, new_question: NewQuestion) -> DatabaseResult<Question>;

    /// Find a question by ID.
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Question>>;

    /// All questions, newest first.
    async fn all(&self) -> DatabaseResult<Vec<Question>>;

    /// All questions authored by a user, newest first.
    async fn all_by_author(&self, author_id: Uuid) -> DatabaseResult<Vec<Question>>;

    /// Replace a question's content. Returns the updated question, or None
    /// when no such question exists.
    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Question>>;

    /// Delete a question. Returns false when no such question existed.
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Delete every question authored by a user. Returns the number removed.
    async fn delete_by_author(&self, author_id: Uuid) -> DatabaseResult<u64>;
}

/// Question store backed by PostgreSQL
#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    /// Create a new question store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Question {
        Question {
            id: row.get("id"),
            author_id: row.get("author_id"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn save(&self, new_question: NewQuestion) -> DatabaseResult<Question> {
        let row = sqlx::query(
            r#"
            INSERT INTO questions (author_id, content)
            VALUES ($1, $2)
            RETURNING id, author_id, content, created_at, updated_at
            "#,
        )
        .bind(new_question.author_id)
        .bind(&new_question.content)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(row))
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Question>> {
        let row = sqlx::query(
            r#"
            SELECT id, author_id, content, created_at, updated_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(Self::map_row))
    }

    async fn all(&self) -> DatabaseResult<Vec<Question>> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_id, content, created_at, updated_at
            FROM questions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }

    async fn all_by_author(&self, author_id: Uuid) -> DatabaseResult<Vec<Question>> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_id, content, created_at, updated_at
            FROM questions
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Question>> {
        let row = sqlx::query(
            r#"
            UPDATE questions
            SET content = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, author_id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(Self::map_row))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_author(&self, author_id: Uuid) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM questions WHERE author_id = $1")
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }
}
