// common/src/models/session.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Server-side record of a logged-in browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    /// Identifier safe to log; the token is not
    pub session_id: Uuid,
    /// Opaque token carried by the session cookie
    pub session_token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl UserSession {
    /// Create a session for a user who just passed the credential check
    pub fn new(session_token: String, username: String) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            session_token,
            username,
            created_at: now,
            last_active: now,
        }
    }

    /// Update session activity timestamp
    pub fn update_activity(&mut self) {
        self.last_active = Utc::now();
    }

    /// Check if the session has expired based on TTL
    pub fn is_expired(&self, ttl_seconds: i64) -> bool {
        let age = Utc::now().signed_duration_since(self.last_active);
        age.num_seconds() > ttl_seconds
    }
}

/// Result of session lookups
#[derive(Debug, Clone)]
pub enum SessionResult {
    Success(UserSession),
    NotFound,
    Expired,
}

/// The user record exposed to pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

impl From<&UserSession> for SessionUser {
    fn from(session: &UserSession) -> Self {
        Self {
            username: session.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_session_is_fresh() {
        let session = UserSession::new("token".to_string(), "usuario1".to_string());
        assert_eq!(session.created_at, session.last_active);
        assert!(!session.is_expired(60));
    }

    #[test]
    fn test_expiry_uses_last_activity() {
        let mut session = UserSession::new("token".to_string(), "usuario1".to_string());
        session.last_active = Utc::now() - Duration::seconds(120);
        assert!(session.is_expired(60));

        session.update_activity();
        assert!(!session.is_expired(60));
    }

    #[test]
    fn test_session_user_from_session() {
        let session = UserSession::new("token".to_string(), "usuario2".to_string());
        let user = SessionUser::from(&session);
        assert_eq!(user, SessionUser { username: "usuario2".to_string() });
    }
}
