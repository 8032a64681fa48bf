use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, RETRY_AFTER},
    Error, ResponseError,
};
use futures::future::LocalBoxFuture;
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DashMapStateStore,
    Quota, RateLimiter,
};
use std::future::{ready, Ready};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

use crate::handlers::error_handler::HttpAppError;
use application::AppError;

type KeyedLimiter = RateLimiter<String, DashMapStateStore<String>, DefaultClock>;

/// Per-IP request budget. Clones share counters, so one instance can be
/// handed to every worker.
#[derive(Clone)]
pub struct PerIpRateLimitMiddleware {
    limiter: Arc<KeyedLimiter>,
}

impl PerIpRateLimitMiddleware {
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
        }
    }

    /// Whole seconds until `ip` may retry, or `None` while it is within budget.
    fn retry_after(&self, ip: &str) -> Option<u64> {
        self.limiter
            .check_key(&ip.to_string())
            .err()
            .map(|not_until| {
                let wait = not_until.wait_time_from(DefaultClock::default().now());
                wait.as_secs().max(1)
            })
    }
}

impl<S, B> Transform<S, ServiceRequest> for PerIpRateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PerIpRateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PerIpRateLimitService {
            service,
            budget: self.clone(),
        }))
    }
}

pub struct PerIpRateLimitService<S> {
    service: S,
    budget: PerIpRateLimitMiddleware,
}

impl<S, B> Service<ServiceRequest> for PerIpRateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        if let Some(wait) = self.budget.retry_after(&ip) {
            warn!(ip = %ip, path = %req.path(), retry_after = wait, "Rate limit exceeded");

            let mut response = HttpAppError(AppError::RateLimited(format!(
                "Too many requests. Try again in {} seconds.",
                wait
            )))
            .error_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(wait));

            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
