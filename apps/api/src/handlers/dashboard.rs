use crate::extractors::AdminUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, web, HttpResponse, Responder};
use application::visitantes::{
    dtos::DateRange,
    use_cases::{AgeDistributionUseCase, DashboardSummaryUseCase, GenderByCultoUseCase},
};
use sea_orm::DatabaseConnection;

#[get("/resumo")]
pub async fn summary(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    range: web::Query<DateRange>,
) -> Result<impl Responder, HttpAppError> {
    let summary = DashboardSummaryUseCase::execute(&db, range.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[get("/genero")]
pub async fn gender_by_culto(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    range: web::Query<DateRange>,
) -> Result<impl Responder, HttpAppError> {
    let report = GenderByCultoUseCase::execute(&db, range.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

#[get("/idade")]
pub async fn age_distribution(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    range: web::Query<DateRange>,
) -> Result<impl Responder, HttpAppError> {
    let report = AgeDistributionUseCase::execute(&db, range.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}
