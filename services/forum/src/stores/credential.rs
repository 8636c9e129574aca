//! Credential store port and its PostgreSQL adapter

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, Role, User};

/// Port for user identity persistence.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Persist a new user.
    async fn save(&self, new_user: NewUser) -> DatabaseResult<User>;

    /// Delete a user. Returns false when no such user existed.
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;
}

/// Credential store backed by PostgreSQL
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new credential store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> DatabaseResult<User> {
        let role: String = row.get("role");
        let role: Role = role
            .parse()
            .map_err(|e: String| DatabaseError::Query(sqlx::Error::Decode(e.into())))?;

        Ok(User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            country: row.get("country"),
            about_me: row.get("about_me"),
            dob: row.get("dob"),
            contact_number: row.get("contact_number"),
            created_at: row.get("created_at"),
        })
    }

    async fn find_by_column(&self, sql: &str, value: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.map(Self::map_row).transpose()
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, role, first_name, last_name, \
                            country, about_me, dob, contact_number, created_at";

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        self.find_by_column(&sql, username).await
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        self.find_by_column(&sql, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.map(Self::map_row).transpose()
    }

    async fn save(&self, new_user: NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let sql = format!(
            "INSERT INTO users (username, email, password_hash, role, first_name, last_name, \
             country, about_me, dob, contact_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(new_user.role.as_str())
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.country)
            .bind(&new_user.about_me)
            .bind(new_user.dob)
            .bind(&new_user.contact_number)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Self::map_row(row)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
