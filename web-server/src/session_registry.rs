// web-server/src/session_registry.rs
use actix::{Actor, Context, Handler, Message, AsyncContext, MessageResult};
use common::models::session::{UserSession, SessionResult};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use crate::utils::token::create_session_token;

// Default session TTL in seconds (24 hours)
const DEFAULT_SESSION_TTL: i64 = 86400;
const DEFAULT_CLEANUP_INTERVAL: u64 = 3600;

/// Actor message: Open a session for an authenticated user, returns the token
#[derive(Message)]
#[rtype(result = "String")]
pub struct CreateSession {
    pub username: String,
}

/// Actor message: Look up a session by token
#[derive(Message)]
#[rtype(result = "SessionResult")]
pub struct GetSession {
    pub session_token: String,
}

/// Actor message: Destroy a session (logout)
#[derive(Message)]
#[rtype(result = "bool")]
pub struct InvalidateSession {
    pub session_token: String,
}

/// Actor message: Clean up expired sessions
#[derive(Message)]
#[rtype(result = "usize")]
pub struct CleanupExpiredSessions;

/// Owns every live session, keyed by the opaque cookie token
pub struct SessionRegistryActor {
    sessions: Arc<DashMap<String, UserSession>>,
    // Session TTL in seconds
    session_ttl: i64,
    // Cleanup interval in seconds
    cleanup_interval: u64,
    expired_count: usize,
}

impl Default for SessionRegistryActor {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistryActor {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            session_ttl: DEFAULT_SESSION_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            expired_count: 0,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.session_ttl = ttl_seconds;
        self
    }

    pub fn with_cleanup_interval(mut self, interval_seconds: u64) -> Self {
        self.cleanup_interval = interval_seconds.max(1);
        self
    }

    fn cleanup_sessions(&mut self) -> usize {
        let ttl = self.session_ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(ttl));
        let removed = before.saturating_sub(self.sessions.len());

        self.expired_count += removed;
        removed
    }
}

impl Actor for SessionRegistryActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!("SessionRegistryActor started with TTL: {}s", self.session_ttl);

        ctx.run_interval(Duration::from_secs(self.cleanup_interval), |act, _ctx| {
            let expired_count = act.cleanup_sessions();
            if expired_count > 0 {
                tracing::info!("Cleaned up {} expired sessions", expired_count);
            }
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!(
            "SessionRegistryActor stopped: {} live sessions, {} expired during lifetime",
            self.sessions.len(),
            self.expired_count
        );
    }
}

impl Handler<CreateSession> for SessionRegistryActor {
    type Result = MessageResult<CreateSession>;

    fn handle(&mut self, msg: CreateSession, _ctx: &mut Self::Context) -> Self::Result {
        let session_token = create_session_token();
        let session = UserSession::new(session_token.clone(), msg.username);

        tracing::info!("Opened session {} for {}", session.session_id, session.username);
        self.sessions.insert(session_token.clone(), session);

        MessageResult(session_token)
    }
}

impl Handler<GetSession> for SessionRegistryActor {
    type Result = MessageResult<GetSession>;

    fn handle(&mut self, msg: GetSession, _ctx: &mut Self::Context) -> Self::Result {
        let lookup = match self.sessions.get_mut(&msg.session_token) {
            Some(mut entry) => {
                let session = entry.value_mut();
                if session.is_expired(self.session_ttl) {
                    tracing::debug!("Session expired: {}", session.session_id);
                    SessionResult::Expired
                } else {
                    session.update_activity();
                    SessionResult::Success(session.clone())
                }
            }
            None => {
                tracing::debug!("Session not found");
                SessionResult::NotFound
            }
        };

        // Entry guard is gone by now; removing under it would deadlock the shard
        if matches!(lookup, SessionResult::Expired)
            && self.sessions.remove(&msg.session_token).is_some()
        {
            self.expired_count += 1;
        }

        MessageResult(lookup)
    }
}

impl Handler<InvalidateSession> for SessionRegistryActor {
    type Result = MessageResult<InvalidateSession>;

    fn handle(&mut self, msg: InvalidateSession, _ctx: &mut Self::Context) -> Self::Result {
        let result = match self.sessions.remove(&msg.session_token) {
            Some((_, session)) => {
                tracing::info!("Closed session {} for {}", session.session_id, session.username);
                true
            }
            None => false,
        };

        MessageResult(result)
    }
}

impl Handler<CleanupExpiredSessions> for SessionRegistryActor {
    type Result = MessageResult<CleanupExpiredSessions>;

    fn handle(&mut self, _msg: CleanupExpiredSessions, _ctx: &mut Self::Context) -> Self::Result {
        let expired_count = self.cleanup_sessions();
        tracing::info!("Cleaned up {} expired sessions", expired_count);
        MessageResult(expired_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_create_then_get_session() {
        let registry = SessionRegistryActor::new().start();

        let token = registry
            .send(CreateSession { username: "usuario1".to_string() })
            .await
            .unwrap();

        match registry.send(GetSession { session_token: token }).await.unwrap() {
            SessionResult::Success(session) => assert_eq!(session.username, "usuario1"),
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unknown_token_is_not_found() {
        let registry = SessionRegistryActor::new().start();
        let result = registry
            .send(GetSession { session_token: "missing".to_string() })
            .await
            .unwrap();
        assert!(matches!(result, SessionResult::NotFound));
    }

    #[actix_web::test]
    async fn test_invalidate_session() {
        let registry = SessionRegistryActor::new().start();
        let token = registry
            .send(CreateSession { username: "usuario2".to_string() })
            .await
            .unwrap();

        assert!(registry
            .send(InvalidateSession { session_token: token.clone() })
            .await
            .unwrap());
        assert!(!registry
            .send(InvalidateSession { session_token: token.clone() })
            .await
            .unwrap());

        let result = registry.send(GetSession { session_token: token }).await.unwrap();
        assert!(matches!(result, SessionResult::NotFound));
    }

    #[actix_web::test]
    async fn test_expired_sessions_are_dropped() {
        let registry = SessionRegistryActor::new().with_ttl(-1).start();
        let token = registry
            .send(CreateSession { username: "usuario1".to_string() })
            .await
            .unwrap();

        let result = registry
            .send(GetSession { session_token: token.clone() })
            .await
            .unwrap();
        assert!(matches!(result, SessionResult::Expired));

        let result = registry.send(GetSession { session_token: token }).await.unwrap();
        assert!(matches!(result, SessionResult::NotFound));
    }

    #[actix_web::test]
    async fn test_cleanup_counts_expired() {
        let registry = SessionRegistryActor::new().with_ttl(-1).start();
        for username in ["usuario1", "usuario2"] {
            registry
                .send(CreateSession { username: username.to_string() })
                .await
                .unwrap();
        }

        assert_eq!(registry.send(CleanupExpiredSessions).await.unwrap(), 2);
        assert_eq!(registry.send(CleanupExpiredSessions).await.unwrap(), 0);
    }
}
