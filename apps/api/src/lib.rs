pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;

use actix_web::web;
use handlers::{
    auth, dashboard, empresas, error_handler, forms, grupos, health, public_forms, users,
    visitantes,
};
use middleware::rate_limit::PerIpRateLimitMiddleware;

/// Registers every route. `auth_limit` guards the credential endpoints.
pub fn routes(cfg: &mut web::ServiceConfig, auth_limit: PerIpRateLimitMiddleware) {
    cfg.app_data(web::JsonConfig::default().error_handler(error_handler::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error_handler::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error_handler::path_error_handler))
        // Health (global per-IP limit only)
        .service(health::health_check)
        .service(
            web::scope("/api/auth")
                .wrap(auth_limit)
                .service(auth::register)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::me),
        )
        .service(
            web::scope("/api/users")
                .service(users::list_users)
                .service(users::review_user),
        )
        .service(
            web::scope("/api/grupos")
                .service(grupos::list_grupos)
                .service(grupos::create_grupo)
                .service(grupos::get_grupo)
                .service(grupos::update_grupo)
                .service(grupos::delete_grupo),
        )
        .service(
            web::scope("/api/empresas")
                .service(empresas::list_empresas)
                .service(empresas::create_empresa)
                .service(empresas::get_empresa)
                .service(empresas::update_empresa)
                .service(empresas::delete_empresa),
        )
        .service(
            web::scope("/api/visitantes")
                .service(visitantes::register_visitor)
                .service(visitantes::list_visitors)
                .service(visitantes::delete_visitor),
        )
        .service(
            web::scope("/api/dashboard")
                .service(dashboard::summary)
                .service(dashboard::gender_by_culto)
                .service(dashboard::age_distribution),
        )
        .service(
            web::scope("/api/forms")
                .service(forms::list_forms)
                .service(forms::create_form)
                .service(forms::list_responses)
                .service(forms::get_form)
                .service(forms::update_form)
                .service(forms::delete_form),
        )
        // Share links
        .service(
            web::scope("/f")
                .service(public_forms::show_form)
                .service(public_forms::submit_response),
        );
}
