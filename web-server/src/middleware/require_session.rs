// web-server/src/middleware/require_session.rs
use std::rc::Rc;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    Error, HttpMessage,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::routes::redirect;
use crate::session::SessionLookup;

const LOGIN_PATH: &str = "/login";

/// Gate for resources that need a logged-in user.
///
/// With a live session the `UserSession` is stored in the request extensions
/// (read it with `web::ReqData<UserSession>`); without one the client is sent
/// to the login page.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireSessionMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let lookup = SessionLookup::new(req.request());

        Box::pin(async move {
            match lookup.resolve().await? {
                Some(session) => {
                    req.extensions_mut().insert(session);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => {
                    tracing::debug!("No session for {}, redirecting to {}", req.path(), LOGIN_PATH);
                    let res = req.into_response(redirect(LOGIN_PATH));
                    Ok(res.map_into_right_body())
                }
            }
        })
    }
}
