use crate::config::Config;
use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    get, post, web, HttpResponse, Responder,
};
use application::auth::{
    dtos::{LoginRequest, RegisterRequest},
    use_cases::{CurrentUserUseCase, LoginUseCase, RegisterUseCase},
};
use sea_orm::DatabaseConnection;

fn auth_cookie<'c>(config: &Config, value: String, max_age: Duration) -> Cookie<'c> {
    Cookie::build(config.auth_cookie_name.clone(), value)
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

#[post("/register")]
pub async fn register(
    db: web::Data<DatabaseConnection>,
    req: web::Json<RegisterRequest>,
) -> Result<impl Responder, HttpAppError> {
    let response = RegisterUseCase::execute(&db, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, HttpAppError> {
    let response = LoginUseCase::execute(&db, &config.auth_config(), req.into_inner()).await?;

    let cookie = auth_cookie(
        &config,
        response.token.clone(),
        Duration::seconds(config.jwt_expiration),
    );
    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}

#[post("/logout")]
pub async fn logout(config: web::Data<Config>) -> impl Responder {
    let cookie = auth_cookie(&config, String::new(), Duration::ZERO);
    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "message": "Signed out" }))
}

#[get("/me")]
pub async fn me(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let profile = CurrentUserUseCase::execute(&db, user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
