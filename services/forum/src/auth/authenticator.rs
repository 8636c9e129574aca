//! Session authenticator
//!
//! Resolves a presented bearer token into an authenticated [`Principal`]
//! through the ordered checks: session exists, session not signed out,
//! owning user resolvable. Read-only: authentication never mutates the
//! stores.

use crate::error::{ForumError, ForumResult};
use crate::models::{Role, Session, User};
use crate::stores::{CredentialStore, SessionStore};

/// The authenticated identity and role resolved from a valid session, plus
/// the matched session record itself.
#[derive(Debug, Clone)]
pub struct Principal {
    user: User,
    session: Session,
}

impl Principal {
    pub fn new(user: User, session: Session) -> Self {
        Self { user, session }
    }

    /// Self identity, derived from the session's owning-user reference.
    pub fn id(&self) -> uuid::Uuid {
        self.session.user_id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Session authenticator over injected store handles
#[derive(Clone)]
pub struct Authenticator<C, S> {
    credentials: C,
    sessions: S,
}

impl<C, S> Authenticator<C, S>
where
    C: CredentialStore,
    S: SessionStore,
{
    /// Create a new authenticator
    pub fn new(credentials: C, sessions: S) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Validate a presented token and yield the principal behind it.
    ///
    /// `action` is the caller's context phrase for the signed-out failure
    /// message ("post a question", "delete an answer", ...). The failure
    /// kind is uniform; only the human-facing message varies.
    ///
    /// The wall-clock expiry claim on the token is not enforced here: the
    /// session store's signed-out boundary is the source of truth, so an
    /// explicit sign-out always wins immediately and passive expiry stays
    /// advisory.
    pub async fn authenticate(&self, token: &str, action: Option<&str>) -> ForumResult<Principal> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or_else(ForumError::not_signed_in)?;

        if session.is_signed_out() {
            return Err(ForumError::signed_out(action));
        }

        let user = self
            .credentials
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(ForumError::not_signed_in)?;

        Ok(Principal::new(user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewSession, NewUser};
    use crate::stores::{MemoryCredentialStore, MemorySessionStore};
    use chrono::{Duration, Utc};

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "hash".to_string(),
            role: Role::User,
            first_name: "Test".to_string(),
            last_name: "Er".to_string(),
            country: None,
            about_me: None,
            dob: None,
            contact_number: None,
        }
    }

    async fn fixture() -> (
        Authenticator<MemoryCredentialStore, MemorySessionStore>,
        MemoryCredentialStore,
        MemorySessionStore,
    ) {
        let credentials = MemoryCredentialStore::new();
        let sessions = MemorySessionStore::new();
        let authenticator = Authenticator::new(credentials.clone(), sessions.clone());
        (authenticator, credentials, sessions)
    }

    #[tokio::test]
    async fn unknown_token_is_unauthenticated() {
        let (authenticator, _, _) = fixture().await;

        let err = authenticator
            .authenticate("never-issued", Some("post a question"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ATHR-001");
        assert_eq!(err.to_string(), "User has not signed in");
    }

    #[tokio::test]
    async fn active_session_yields_the_owning_principal() {
        let (authenticator, credentials, sessions) = fixture().await;

        let user = credentials.save(new_user("alice")).await.unwrap();
        let now = Utc::now();
        sessions
            .save(NewSession {
                user_id: user.id,
                access_token: "tok-1".to_string(),
                issued_at: now,
                expires_at: now + Duration::hours(8),
            })
            .await
            .unwrap();

        let principal = authenticator.authenticate("tok-1", None).await.unwrap();
        assert_eq!(principal.id(), user.id);
        assert_eq!(principal.role(), Role::User);
        assert_eq!(principal.session().access_token, "tok-1");
    }

    #[tokio::test]
    async fn signed_out_session_fails_with_the_action_message() {
        let (authenticator, credentials, sessions) = fixture().await;

        let user = credentials.save(new_user("alice")).await.unwrap();
        let now = Utc::now();
        sessions
            .save(NewSession {
                user_id: user.id,
                access_token: "tok-1".to_string(),
                issued_at: now,
                expires_at: now + Duration::hours(8),
            })
            .await
            .unwrap();
        sessions.record_logout("tok-1", Utc::now()).await.unwrap();

        let err = authenticator
            .authenticate("tok-1", Some("post a question"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ATHR-002");
        assert_eq!(
            err.to_string(),
            "User is signed out.Sign in first to post a question"
        );
    }

    #[tokio::test]
    async fn expired_but_not_signed_out_session_still_authenticates() {
        // The 8h expiry claim is advisory; only a recorded logout revokes.
        let (authenticator, credentials, sessions) = fixture().await;

        let user = credentials.save(new_user("alice")).await.unwrap();
        let issued = Utc::now() - Duration::hours(20);
        sessions
            .save(NewSession {
                user_id: user.id,
                access_token: "tok-old".to_string(),
                issued_at: issued,
                expires_at: issued + Duration::hours(8),
            })
            .await
            .unwrap();

        assert!(authenticator.authenticate("tok-old", None).await.is_ok());
    }

    #[tokio::test]
    async fn session_for_a_deleted_user_is_unauthenticated() {
        let (authenticator, credentials, sessions) = fixture().await;

        let user = credentials.save(new_user("alice")).await.unwrap();
        let now = Utc::now();
        sessions
            .save(NewSession {
                user_id: user.id,
                access_token: "tok-1".to_string(),
                issued_at: now,
                expires_at: now + Duration::hours(8),
            })
            .await
            .unwrap();
        credentials.delete(user.id).await.unwrap();

        let err = authenticator.authenticate("tok-1", None).await.unwrap_err();
        assert_eq!(err.code(), "ATHR-001");
    }
}
