use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::task::{Context, Poll};

use crate::config::Config;
use crate::handlers::error_handler::HttpAppError;
use application::auth::decode_token;
use application::AppError;

/// Resolves the caller's JWT, from `Authorization: Bearer` or the auth cookie,
/// into request extensions. Requests without a token pass through untouched.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(|t| t.trim().to_string())
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

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(config) = req.app_data::<web::Data<Config>>().cloned() {
            if let Some(token) = bearer_token(&req) {
                // An explicit header that fails to verify is an error
                match decode_token(&config.jwt_secret, &token) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                    }
                    Err(_) => {
                        return Box::pin(async move {
                            Err(Error::from(HttpAppError(AppError::Authentication(
                                "Invalid or expired token".to_string(),
                            ))))
                        });
                    }
                }
            } else if let Some(cookie) = req.cookie(&config.auth_cookie_name) {
                // A stale cookie just means an anonymous request
                if let Ok(claims) = decode_token(&config.jwt_secret, cookie.value()) {
                    req.extensions_mut().insert(claims);
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
