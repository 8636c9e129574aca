//! User service: registration, session lifecycle, profiles, admin delete

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::auth::{
    Authenticator, Capability, SESSION_TTL_HOURS, TokenIssuer, authorize, password,
};
use crate::error::{ForumError, ForumResult};
use crate::models::{NewSession, NewUser, Role, Session, User};
use crate::rate_limiter::SigninRateLimiter;
use crate::stores::{AnswerStore, CredentialStore, QuestionStore, SessionStore};
use crate::validation;

/// Registration input, validated before anything is persisted.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact_number: Option<String>,
}

/// User service over injected store handles
#[derive(Clone)]
pub struct UserService<C, S, Q, A> {
    credentials: C,
    sessions: S,
    questions: Q,
    answers: A,
    authenticator: Authenticator<C, S>,
    tokens: TokenIssuer,
    rate_limiter: SigninRateLimiter,
}

impl<C, S, Q, A> UserService<C, S, Q, A>
where
    C: CredentialStore + Clone,
    S: SessionStore + Clone,
    Q: QuestionStore,
    A: AnswerStore,
{
    /// Create a new user service
    pub fn new(
        credentials: C,
        sessions: S,
        questions: Q,
        answers: A,
        tokens: TokenIssuer,
        rate_limiter: SigninRateLimiter,
    ) -> Self {
        let authenticator = Authenticator::new(credentials.clone(), sessions.clone());
        Self {
            credentials,
            sessions,
            questions,
            answers,
            authenticator,
            tokens,
            rate_limiter,
        }
    }

    /// Register a new user with the default role.
    ///
    /// Username and email must each be globally unique at creation time.
    pub async fn register(&self, registration: Registration) -> ForumResult<User> {
        validation::validate_username(&registration.username).map_err(ForumError::Validation)?;
        validation::validate_email(&registration.email).map_err(ForumError::Validation)?;
        validation::validate_password(&registration.password).map_err(ForumError::Validation)?;

        if self
            .credentials
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(ForumError::DuplicateUsername);
        }

        if self
            .credentials
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(ForumError::DuplicateEmail);
        }

        let password_hash = password::hash_password(&registration.password)?;

        let user = self
            .credentials
            .save(NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                role: Role::User,
                first_name: registration.first_name,
                last_name: registration.last_name,
                country: registration.country,
                about_me: registration.about_me,
                dob: registration.dob,
                contact_number: registration.contact_number,
            })
            .await?;

        info!("Registered user: {}", user.username);
        Ok(user)
    }

    /// Sign a user in, minting a fresh session.
    ///
    /// Every successful sign-in creates a brand-new session record; an old
    /// signed-out session is never resurrected.
    pub async fn sign_in(&self, username: &str, sign_in_password: &str) -> ForumResult<Session> {
        if !self.rate_limiter.is_allowed(username).await {
            return Err(ForumError::RateLimited);
        }

        let user = self
            .credentials
            .find_by_username(username)
            .await?
            .ok_or(ForumError::UnknownUser)?;

        if !password::verify_password(&user.password_hash, sign_in_password)? {
            self.rate_limiter.record_failure(username).await;
            return Err(ForumError::BadCredential);
        }
        self.rate_limiter.record_success(username).await;

        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::hours(SESSION_TTL_HOURS);
        let access_token = self.tokens.issue(user.id, issued_at, expires_at)?;

        let session = self
            .sessions
            .save(NewSession {
                user_id: user.id,
                access_token,
                issued_at,
                expires_at,
            })
            .await?;

        info!("Signed in user: {}", user.username);
        Ok(session)
    }

    /// Sign a session out by stamping its logout timestamp.
    ///
    /// The one mutation a session ever receives. A token with no session on
    /// record and a token that is already signed out both fail the same way:
    /// there is nothing left to sign out.
    pub async fn sign_out(&self, token: &str) -> ForumResult<Session> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or(ForumError::SignOutRestricted)?;

        if session.is_signed_out() {
            return Err(ForumError::SignOutRestricted);
        }

        let session = self
            .sessions
            .record_logout(token, Utc::now())
            .await?
            .ok_or(ForumError::SignOutRestricted)?;

        info!("Signed out session for user: {}", session.user_id);
        Ok(session)
    }

    /// Fetch any user's profile. Open to all authenticated users.
    pub async fn get_profile(&self, token: &str, user_id: Uuid) -> ForumResult<User> {
        self.authenticator
            .authenticate(token, Some("get user details"))
            .await?;

        self.credentials
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ForumError::UserNotFound {
                message: "User with entered uuid does not exist".to_string(),
            })
    }

    /// Delete a user account. Admin only; the target must exist (checked
    /// before the role check).
    ///
    /// Cascade policy: the target's sessions are revoked (stamped signed
    /// out, rows retained for audit), answers under the target's questions
    /// and the target's own answers are removed, then the target's
    /// questions, then the user row.
    pub async fn delete_user(&self, token: &str, target_id: Uuid) -> ForumResult<User> {
        let principal = self.authenticator.authenticate(token, None).await?;

        let target = self
            .credentials
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ForumError::UserNotFound {
                message: "User with entered uuid to be deleted does not exist".to_string(),
            })?;

        authorize(&principal, Capability::AdminOnly, None).map_err(|_| ForumError::Forbidden {
            message: "Unauthorized Access, Entered user is not an admin".to_string(),
        })?;

        let now = Utc::now();
        let revoked = self.sessions.revoke_all_for_user(target.id, now).await?;

        for question in self.questions.all_by_author(target.id).await? {
            self.answers.delete_by_question(question.id).await?;
        }
        self.answers.delete_by_author(target.id).await?;
        self.questions.delete_by_author(target.id).await?;
        self.credentials.delete(target.id).await?;

        info!(
            "Deleted user {} and revoked {} session(s)",
            target.username, revoked
        );
        Ok(target)
    }
}
