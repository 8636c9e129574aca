//! Answer store port and its PostgreSQL adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{Answer, NewAnswer};

/// Port for answer persistence.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Persist a new answer.
    async fn save(&self, new_answer: NewAnswer) -> DatabaseResult<Answer>;

    /// Find an answer by ID.
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Answer>>;

    /// All answers to a question, oldest first.
    async fn all_by_question(&self, question_id: Uuid) -> DatabaseResult<Vec<Answer>>;

    /// Replace an answer's content. Returns the updated answer, or None when
    /// no such answer exists.
    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Answer>>;

    /// Delete an answer. Returns false when no such answer existed.
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Delete every answer under a question. Returns the number removed.
    async fn delete_by_question(&self, question_id: Uuid) -> DatabaseResult<u64>;

    /// Delete every answer authored by a user. Returns the number removed.
    async fn delete_by_author(&self, author_id: Uuid) -> DatabaseResult<u64>;
}

/// Answer store backed by PostgreSQL
#[derive(Clone)]
pub struct PgAnswerStore {
    pool: PgPool,
}

impl PgAnswerStore {
    /// Create a new answer store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Answer {
        Answer {
            id: row.get("id"),
            author_id: row.get("author_id"),
            question_id: row.get("question_id"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl AnswerStore for PgAnswerStore {
    async fn save(&self, new_answer: NewAnswer) -> DatabaseResult<Answer> {
        let row = sqlx::query(
            r#"
            INSERT INTO answers (author_id, question_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, question_id, content, created_at, updated_at
            "#,
        )
        .bind(new_answer.author_id)
        .bind(new_answer.question_id)
        .bind(&new_answer.content)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(row))
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Answer>> {
        let row = sqlx::query(
            r#"
            SELECT id, author_id, question_id, content, created_at, updated_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(Self::map_row))
    }

    async fn all_by_question(&self, question_id: Uuid) -> DatabaseResult<Vec<Answer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_id, question_id, content, created_at, updated_at
            FROM answers
            WHERE question_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(question_id)
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
    ) -> DatabaseResult<Option<Answer>> {
        let row = sqlx::query(
            r#"
            UPDATE answers
            SET content = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, author_id, question_id, content, created_at, updated_at
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
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_question(&self, question_id: Uuid) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_author(&self, author_id: Uuid) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM answers WHERE author_id = $1")
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }
}
