//! Session model and the signed-out decision rule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session entity
///
/// A session is created on sign-in and mutated exactly once, when sign-out
/// records the logout timestamp. Rows are never deleted; a revoked session
/// stays in the table for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logged_out_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A session is signed out once a logout timestamp exists that is not
    /// before the issue time. A session with no logout on record is active
    /// regardless of the wall-clock `expires_at` claim: the store, not the
    /// clock, is the source of truth for usability.
    pub fn is_signed_out(&self) -> bool {
        self.logged_out_at.is_some_and(|t| t >= self.issued_at)
    }

    /// Inverse of [`Session::is_signed_out`].
    pub fn is_active(&self) -> bool {
        !self.is_signed_out()
    }
}

/// New session creation payload
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: Uuid,
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(issued_at: DateTime<Utc>, logged_out_at: Option<DateTime<Utc>>) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            access_token: "token".to_string(),
            issued_at,
            expires_at: issued_at + Duration::hours(8),
            logged_out_at,
        }
    }

    #[test]
    fn never_logged_out_session_is_active() {
        let s = session(Utc::now(), None);
        assert!(s.is_active());
        assert!(!s.is_signed_out());
    }

    #[test]
    fn never_logged_out_session_stays_active_past_expiry() {
        // The 8h expiry claim is advisory metadata; only a recorded logout
        // flips the session to signed out.
        let issued = Utc::now() - Duration::hours(20);
        let s = session(issued, None);
        assert!(s.is_active());
    }

    #[test]
    fn logout_at_or_after_issue_signs_the_session_out() {
        let issued = Utc::now();
        assert!(session(issued, Some(issued)).is_signed_out());
        assert!(session(issued, Some(issued + Duration::minutes(5))).is_signed_out());
    }

    #[test]
    fn logout_before_issue_does_not_sign_out() {
        // The asymmetry of the rule: a logout predating the issue time
        // belongs to no meaningful lifecycle and does not revoke the session.
        let issued = Utc::now();
        let s = session(issued, Some(issued - Duration::minutes(1)));
        assert!(s.is_active());
    }
}
