//! Session store port and its PostgreSQL adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewSession, Session};

/// Port for session persistence.
///
/// Sessions are append-then-stamp: `save` inserts a fully active record and
/// `record_logout` is the only mutation ever applied to it. Rows are never
/// deleted. Token uniqueness under concurrent sign-in is this store's
/// responsibility (unique index on `access_token` in the Pg adapter, the
/// token-keyed map in the in-memory one).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Find a session by its access token, signed out or not.
    async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<Session>>;

    /// Persist a new, fully active session (no logout on record).
    async fn save(&self, new_session: NewSession) -> DatabaseResult<Session>;

    /// Stamp the logout timestamp on a session. Last writer wins; returns
    /// the updated session, or None when the token is unknown.
    async fn record_logout(&self, token: &str, at: DateTime<Utc>)
    -> DatabaseResult<Option<Session>>;

    /// Stamp a logout on every active session owned by a user. Returns the
    /// number of sessions revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid, at: DateTime<Utc>) -> DatabaseResult<u64>;
}

/// Session store backed by PostgreSQL
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new session store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Session {
        Session {
            id: row.get("id"),
            user_id: row.get("user_id"),
            access_token: row.get("access_token"),
            issued_at: row.get("issued_at"),
            expires_at: row.get("expires_at"),
            logged_out_at: row.get("logged_out_at"),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, access_token, issued_at, expires_at, logged_out_at
            FROM sessions
            WHERE access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(Self::map_row))
    }

    async fn save(&self, new_session: NewSession) -> DatabaseResult<Session> {
        info!("Creating session for user: {}", new_session.user_id);

        let row = sqlx::query(
            r#"
            INSERT INTO sessions (user_id, access_token, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, access_token, issued_at, expires_at, logged_out_at
            "#,
        )
        .bind(new_session.user_id)
        .bind(&new_session.access_token)
        .bind(new_session.issued_at)
        .bind(new_session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(row))
    }

    async fn record_logout(
        &self,
        token: &str,
        at: DateTime<Utc>,
    ) -> DatabaseResult<Option<Session>> {
        let row = sqlx::query(
            r#"
            UPDATE sessions
            SET logged_out_at = $2
            WHERE access_token = $1
            RETURNING id, user_id, access_token, issued_at, expires_at, logged_out_at
            "#,
        )
        .bind(token)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(Self::map_row))
    }

    async fn revoke_all_for_user(&self, user_id: Uuid, at: DateTime<Utc>) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET logged_out_at = $2
            WHERE user_id = $1 AND logged_out_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }
}
