use crate::extractors::AdminUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use application::forms::{
    dtos::{CreateFormRequest, UpdateFormRequest},
    use_cases::{
        CreateFormUseCase, DeleteFormUseCase, GetFormUseCase, ListFormResponsesUseCase,
        ListFormsUseCase, UpdateFormUseCase,
    },
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[get("")]
pub async fn list_forms(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let forms = ListFormsUseCase::execute(&db).await?;
    Ok(HttpResponse::Ok().json(forms))
}

#[post("")]
pub async fn create_form(
    admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateFormRequest>,
) -> Result<impl Responder, HttpAppError> {
    let form = CreateFormUseCase::execute(&db, &admin, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(form))
}

#[get("/{id}")]
pub async fn get_form(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    let form = GetFormUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(form))
}

#[put("/{id}")]
pub async fn update_form(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateFormRequest>,
) -> Result<impl Responder, HttpAppError> {
    let form = UpdateFormUseCase::execute(&db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(form))
}

#[delete("/{id}")]
pub async fn delete_form(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    DeleteFormUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{id}/responses")]
pub async fn list_responses(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    let responses = ListFormResponsesUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(responses))
}
