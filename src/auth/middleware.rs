use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenAuthority;
use crate::error::AppError;

/// Role required by the admin gate. The comparison is exact: registration
/// assigns the lowercase "user", so a self-registered account never matches
/// until its role is changed out of band.
pub const ADMIN_ROLE: &str = "Admin";

/// Splits an Authorization header into scheme and token. The header must be
/// exactly two space-separated parts with a case-insensitive `bearer`
/// scheme; anything else is rejected.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

/// The authenticated gate: verifies the bearer token on every request it
/// wraps and attaches the caller's identity and role to request extensions
/// for downstream handlers and the admin gate.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authority = match req.app_data::<web::Data<TokenAuthority>>() {
            Some(authority) => authority.clone(),
            None => {
                let err = AppError::Internal("Token authority not configured".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        let header = match req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
        {
            Some(value) => value.to_owned(),
            None => {
                let err = AppError::Unauthorized("Authorization header required".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        let token = match parse_bearer(&header) {
            Some(token) => token,
            None => {
                let err = AppError::Unauthorized("Invalid authorization header".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        match authority.validate(token) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthenticatedUser {
                    email: claims.email,
                    role: claims.role,
                });
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}

/// The admin gate: requires the authenticated gate to have already attached
/// a caller, and that caller's role to equal [`ADMIN_ROLE`].
pub struct AdminMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AdminMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddlewareService { service }))
    }
}

pub struct AdminMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let is_admin = req
            .extensions()
            .get::<AuthenticatedUser>()
            .map(|user| user.role == ADMIN_ROLE)
            .unwrap_or(false);

        if !is_admin {
            let err = AppError::Forbidden("Admins only".into());
            return Box::pin(async move { Err(err.into()) });
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_accepts_well_formed_headers() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(parse_bearer("bearer token"), Some("token"));
        assert_eq!(parse_bearer("BEARER token"), Some("token"));
    }

    #[test]
    fn test_parse_bearer_rejects_malformed_headers() {
        assert_eq!(parse_bearer(""), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer a b"), None);
        assert_eq!(parse_bearer("Bearer  token"), None);
        assert_eq!(parse_bearer("Token abc"), None);
        assert_eq!(parse_bearer("abc.def.ghi"), None);
    }
}
