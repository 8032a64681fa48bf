use crate::extractors::AdminUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use application::grupos::{
    dtos::{GrupoInput, ListGruposQuery},
    use_cases::{
        CreateGrupoUseCase, DeleteGrupoUseCase, GetGrupoUseCase, ListGruposUseCase,
        UpdateGrupoUseCase,
    },
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[get("")]
pub async fn list_grupos(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListGruposQuery>,
) -> Result<impl Responder, HttpAppError> {
    let grupos = ListGruposUseCase::execute(&db, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(grupos))
}

#[get("/{id}")]
pub async fn get_grupo(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    let grupo = GetGrupoUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(grupo))
}

#[post("")]
pub async fn create_grupo(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<GrupoInput>,
) -> Result<impl Responder, HttpAppError> {
    let grupo = CreateGrupoUseCase::execute(&db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(grupo))
}

#[put("/{id}")]
pub async fn update_grupo(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<GrupoInput>,
) -> Result<impl Responder, HttpAppError> {
    let grupo = UpdateGrupoUseCase::execute(&db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(grupo))
}

#[delete("/{id}")]
pub async fn delete_grupo(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    DeleteGrupoUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
