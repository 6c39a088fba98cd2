use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::{header, Method},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use architecture::UserInfo;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use super::SessionKeys;
use crate::config::SessionConfig;

const UNAUTHORIZED_MESSAGE: &str = "You must be logged in to access this resource.";

/// What the guard does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    /// `302 Found` to the location.
    Redirect(String),
    /// `401` JSON body, API routes only.
    Unauthorized,
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// API routes reachable without a session.
fn is_public_api(method: &Method, path: &str) -> bool {
    const OPEN: [&str; 3] = ["/api/auth/register", "/api/auth/sign-in", "/api/auth/sign-out"];
    if OPEN.contains(&path) {
        return true;
    }
    // Customer detail has never been gated.
    *method == Method::GET
        && path
            .strip_prefix("/api/customers/")
            .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

/// Percent-encodes a query value the way browsers' `encodeURIComponent` does.
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| match chunk {
            "+" => "%20",
            "%21" => "!",
            "%27" => "'",
            "%28" => "(",
            "%29" => ")",
            "%7E" => "~",
            other => other,
        })
        .collect()
}

/// Routing rules of the guard, independent of actix.
pub fn decide(
    config: &SessionConfig,
    method: &Method,
    path: &str,
    query: &str,
    authenticated: bool,
) -> GuardDecision {
    if matches_prefix(path, "/api") {
        return if authenticated || is_public_api(method, path) {
            GuardDecision::Pass
        } else {
            GuardDecision::Unauthorized
        };
    }
    if authenticated {
        if config.guest_pages().iter().any(|page| matches_prefix(path, page)) {
            return GuardDecision::Redirect(config.home_path().clone());
        }
        return GuardDecision::Pass;
    }
    if config.protected_pages().iter().any(|page| matches_prefix(path, page)) {
        let from = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };
        return GuardDecision::Redirect(format!(
            "{}?from={}",
            config.sign_in_path(),
            encode_component(&from)
        ));
    }
    GuardDecision::Pass
}

/// Resolves the session token of every request and gates pages and API routes.
///
/// The token is read from the session cookie, then from an `Authorization: Bearer`
/// header when the cookie is missing or does not resolve. A valid token puts its
/// [`UserInfo`] into the request extensions.
pub struct SessionGuard {
    keys: Arc<SessionKeys>,
    config: Arc<SessionConfig>,
}

impl SessionGuard {
    pub fn new(keys: Arc<SessionKeys>, config: SessionConfig) -> Self {
        Self {
            keys,
            config: Arc::new(config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
            keys: self.keys.clone(),
            config: self.config.clone(),
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
    keys: Arc<SessionKeys>,
    config: Arc<SessionConfig>,
}

impl<S> SessionGuardMiddleware<S> {
    fn bearer_token(req: &ServiceRequest) -> Option<String> {
        let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
        value.strip_prefix("Bearer ").map(|token| token.trim().to_string())
    }

    /// First token that resolves, the cookie before the bearer header.
    fn session_user(&self, req: &ServiceRequest) -> Option<UserInfo> {
        let cookie = req.cookie(self.keys.cookie_name()).map(|c| c.value().to_string());
        cookie
            .into_iter()
            .chain(Self::bearer_token(req))
            .find_map(|token| match self.keys.resolve(&token) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::debug!("Ignoring session token: {e}");
                    None
                }
            })
    }
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let user = self.session_user(&req);
        let decision = decide(
            &self.config,
            req.method(),
            req.path(),
            req.query_string(),
            user.is_some(),
        );
        Box::pin(async move {
            let response = match decision {
                GuardDecision::Pass => {
                    if let Some(user) = user {
                        req.extensions_mut().insert(user);
                    }
                    return Ok(service.call(req).await?.map_into_left_body());
                }
                GuardDecision::Redirect(location) => {
                    tracing::debug!("Redirecting {} to {location}", req.path());
                    HttpResponse::Found()
                        .insert_header((header::LOCATION, location))
                        .finish()
                }
                GuardDecision::Unauthorized => HttpResponse::Unauthorized()
                    .json(serde_json::json!({ "error": UNAUTHORIZED_MESSAGE })),
            };
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

/// The signed-in user, put in place by [`SessionGuard`].
#[derive(Debug, Clone)]
pub struct SessionUser(pub UserInfo);

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<UserInfo>().cloned();
        ready(user.map(SessionUser).ok_or_else(|| {
            InternalError::from_response(
                UNAUTHORIZED_MESSAGE,
                HttpResponse::Unauthorized()
                    .json(serde_json::json!({ "error": UNAUTHORIZED_MESSAGE })),
            )
            .into()
        }))
    }
}
