use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use application::auth::dtos::{Actor, Claims};
use application::auth::use_cases::ResolveActorUseCase;
use application::AppError;
use futures::future::LocalBoxFuture;
use sea_orm::DatabaseConnection;

use crate::handlers::error_handler::HttpAppError;

/// Claims alone are not trusted: the account behind them must still exist and be approved.
fn actor_from(req: &HttpRequest) -> LocalBoxFuture<'static, Result<Option<Actor>, HttpAppError>> {
    let claims = req.extensions().get::<Claims>().cloned();
    let db = req.app_data::<web::Data<DatabaseConnection>>().cloned();

    Box::pin(async move {
        let Some(claims) = claims else {
            return Ok(None);
        };
        let db = db.ok_or_else(|| {
            HttpAppError(AppError::Internal(anyhow::anyhow!(
                "Database connection not configured"
            )))
        })?;

        ResolveActorUseCase::execute(&db, &claims)
            .await
            .map(Some)
            .map_err(HttpAppError)
    })
}

/// Any signed-in user. 401 otherwise.
pub struct AuthUser(pub Actor);

impl FromRequest for AuthUser {
    type Error = HttpAppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = actor_from(req);
        Box::pin(async move {
            actor.await?.map(AuthUser).ok_or_else(|| {
                HttpAppError(AppError::Authentication("Unauthorized".to_string()))
            })
        })
    }
}

/// A signed-in ADMIN. 401 when anonymous, 403 for members.
pub struct AdminUser(pub Actor);

impl FromRequest for AdminUser {
    type Error = HttpAppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = actor_from(req);
        Box::pin(async move {
            match actor.await? {
                Some(actor) if actor.is_admin() => Ok(AdminUser(actor)),
                Some(_) => Err(HttpAppError(AppError::Authorization(
                    "Admin access required".to_string(),
                ))),
                None => Err(HttpAppError(AppError::Authentication("Unauthorized".to_string()))),
            }
        })
    }
}

/// The caller, when signed in.
pub struct OptionalAuthUser(pub Option<Actor>);

impl FromRequest for OptionalAuthUser {
    type Error = HttpAppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let actor = actor_from(req);
        Box::pin(async move { actor.await.map(OptionalAuthUser) })
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Actor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = Actor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
