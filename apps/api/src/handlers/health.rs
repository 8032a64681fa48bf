use actix_web::{get, web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;

#[get("/health")]
pub async fn health_check(db: web::Data<DatabaseConnection>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "database": "up",
        })),
        Err(e) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "degraded",
                "database": "down",
            }))
        }
    }
}
