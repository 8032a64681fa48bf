use crate::extractors::OptionalAuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, web, HttpResponse, Responder};
use application::forms::{
    dtos::SubmitResponseRequest,
    public::{ResolvePublicFormUseCase, SubmitResponseUseCase},
};
use infrastructure::Notifier;
use sea_orm::DatabaseConnection;

#[get("/{token}")]
pub async fn show_form(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<impl Responder, HttpAppError> {
    let form = ResolvePublicFormUseCase::execute(&db, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(form))
}

#[post("/{token}/responses")]
pub async fn submit_response(
    user: OptionalAuthUser,
    db: web::Data<DatabaseConnection>,
    notifier: web::Data<dyn Notifier>,
    path: web::Path<String>,
    body: web::Json<SubmitResponseRequest>,
) -> Result<impl Responder, HttpAppError> {
    let receipt = SubmitResponseUseCase::execute(
        &db,
        notifier.get_ref(),
        &path.into_inner(),
        user.0.as_ref(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(receipt))
}
