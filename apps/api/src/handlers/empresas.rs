use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use application::empresas::{
    dtos::{EmpresaInput, ListEmpresasQuery},
    use_cases::{
        CreateEmpresaUseCase, DeleteEmpresaUseCase, GetEmpresaUseCase, ListEmpresasUseCase,
        UpdateEmpresaUseCase,
    },
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[get("")]
pub async fn list_empresas(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListEmpresasQuery>,
) -> Result<impl Responder, HttpAppError> {
    let empresas = ListEmpresasUseCase::execute(&db, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(empresas))
}

#[get("/{id}")]
pub async fn get_empresa(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    let empresa = GetEmpresaUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(empresa))
}

#[post("")]
pub async fn create_empresa(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<EmpresaInput>,
) -> Result<impl Responder, HttpAppError> {
    let empresa = CreateEmpresaUseCase::execute(&db, &user, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(empresa))
}

#[put("/{id}")]
pub async fn update_empresa(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<EmpresaInput>,
) -> Result<impl Responder, HttpAppError> {
    let empresa =
        UpdateEmpresaUseCase::execute(&db, &user, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(empresa))
}

#[delete("/{id}")]
pub async fn delete_empresa(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    DeleteEmpresaUseCase::execute(&db, &user, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
