use crate::extractors::AdminUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use application::visitantes::{
    dtos::{ListVisitorsQuery, RegisterVisitorRequest},
    use_cases::{DeleteVisitorUseCase, ListVisitorsUseCase, RegisterVisitorUseCase},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Open to anyone: the welcome desk form posts here.
#[post("")]
pub async fn register_visitor(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterVisitorRequest>,
) -> Result<impl Responder, HttpAppError> {
    let visitor = RegisterVisitorUseCase::execute(&db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(visitor))
}

#[get("")]
pub async fn list_visitors(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListVisitorsQuery>,
) -> Result<impl Responder, HttpAppError> {
    let visitors = ListVisitorsUseCase::execute(&db, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(visitors))
}

#[delete("/{id}")]
pub async fn delete_visitor(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    DeleteVisitorUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
