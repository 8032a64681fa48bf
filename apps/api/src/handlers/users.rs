use crate::extractors::AdminUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, patch, web, HttpResponse, Responder};
use application::users::{
    dtos::{ListUsersQuery, ReviewUserRequest},
    use_cases::{ListUsersUseCase, ReviewUserUseCase},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[get("")]
pub async fn list_users(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListUsersQuery>,
) -> Result<impl Responder, HttpAppError> {
    let users = ListUsersUseCase::execute(&db, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[patch("/{id}")]
pub async fn review_user(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewUserRequest>,
) -> Result<impl Responder, HttpAppError> {
    let outcome =
        ReviewUserUseCase::execute(&db, &admin, path.into_inner(), body.into_inner().action)
            .await?;
    Ok(HttpResponse::Ok().json(outcome))
}
