// web-server/src/routes/auth.rs
use actix::Addr;
use actix_web::{web, HttpRequest, HttpResponse};
use common::models::session::{SessionUser, UserSession};
use common::SessionConfig;
use serde::Deserialize;

use super::{html, redirect_to};
use crate::credentials::CredentialVerifier;
use crate::error::AppError;
use crate::session::{removal_cookie, session_cookie, session_token, CurrentUser};
use crate::session_registry::{CreateSession, InvalidateSession, SessionRegistryActor};
use crate::templates::{Page, Pages};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_form(current: CurrentUser, pages: web::Data<Pages>) -> Result<HttpResponse, AppError> {
    Ok(html(pages.render(Page::Login, current.user())?))
}

pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    verifier: web::Data<dyn CredentialVerifier>,
    registry: web::Data<Addr<SessionRegistryActor>>,
    session_config: web::Data<SessionConfig>,
    pages: web::Data<Pages>,
) -> Result<HttpResponse, AppError> {
    let LoginForm { username, password } = form.into_inner();

    // bcrypt verification blocks
    let verifier = verifier.into_inner();
    let user = web::block(move || verifier.verify(&username, &password)).await?;

    let Some(user) = user else {
        tracing::info!("Rejected login attempt");
        let body = pages.render_with_error(Page::Login, None, Some(INVALID_CREDENTIALS))?;
        return Ok(html(body));
    };

    // A new login always gets a new token
    if let Some(previous) = session_token(&req) {
        registry.send(InvalidateSession { session_token: previous }).await?;
    }

    let token = registry
        .send(CreateSession { username: user.username.clone() })
        .await?;
    tracing::info!("User {} logged in", user.username);

    Ok(redirect_to("/")
        .cookie(session_cookie(&session_config, token))
        .finish())
}

pub async fn logout(
    req: HttpRequest,
    registry: web::Data<Addr<SessionRegistryActor>>,
    session_config: web::Data<SessionConfig>,
) -> Result<HttpResponse, AppError> {
    if let Some(session_token) = session_token(&req) {
        if registry.send(InvalidateSession { session_token }).await? {
            tracing::info!("Session closed by logout");
        }
    }

    Ok(redirect_to("/")
        .cookie(removal_cookie(&session_config))
        .finish())
}

/// Only reachable through the session gate
pub async fn protected(
    session: web::ReqData<UserSession>,
    pages: web::Data<Pages>,
) -> Result<HttpResponse, AppError> {
    let user = SessionUser::from(&*session);
    Ok(html(pages.render(Page::Protected, Some(user))?))
}
