// web-server/src/session.rs
use actix::Addr;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use common::models::session::{SessionResult, SessionUser, UserSession};
use common::SessionConfig;
use futures_util::future::LocalBoxFuture;

use crate::error::AppError;
use crate::session_registry::{GetSession, SessionRegistryActor};

/// Cookie carrying a fresh session token
pub fn session_cookie(config: &SessionConfig, session_token: String) -> Cookie<'static> {
    cookie_with_attributes(config, session_token, config.ttl_seconds)
}

/// Empty, already-expired cookie that makes the browser forget the session.
/// Carries the same attributes as the cookie it replaces.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    cookie_with_attributes(config, String::new(), 0)
}

fn cookie_with_attributes(config: &SessionConfig, value: String, max_age: i64) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), value)
        .path("/")
        .secure(config.secure_cookie)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age))
        .finish()
}

/// Session token sent by the browser, if any
pub fn session_token(req: &HttpRequest) -> Option<String> {
    let config = req.app_data::<web::Data<SessionConfig>>()?;
    req.cookie(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Everything needed to resolve a request's session without borrowing the request
pub struct SessionLookup {
    registry: Option<web::Data<Addr<SessionRegistryActor>>>,
    token: Option<String>,
}

impl SessionLookup {
    pub fn new(req: &HttpRequest) -> Self {
        Self {
            registry: req.app_data::<web::Data<Addr<SessionRegistryActor>>>().cloned(),
            token: session_token(req),
        }
    }

    pub async fn resolve(self) -> Result<Option<UserSession>, AppError> {
        let (Some(registry), Some(session_token)) = (self.registry, self.token) else {
            return Ok(None);
        };

        match registry.send(GetSession { session_token }).await? {
            SessionResult::Success(session) => Ok(Some(session)),
            SessionResult::Expired => {
                tracing::info!("Request carried an expired session");
                Ok(None)
            }
            SessionResult::NotFound => Ok(None),
        }
    }
}

/// The logged-in user, if the request carries a live session
pub struct CurrentUser(pub Option<UserSession>);

impl CurrentUser {
    pub fn user(&self) -> Option<SessionUser> {
        self.0.as_ref().map(SessionUser::from)
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let lookup = SessionLookup::new(req);
        Box::pin(async move { lookup.resolve().await.map(CurrentUser) })
    }
}
