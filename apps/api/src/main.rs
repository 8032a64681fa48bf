use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::middleware::auth::AuthMiddleware;
use api::middleware::rate_limit::PerIpRateLimitMiddleware;
use application::auth::use_cases::EnsureAdminUseCase;
use infrastructure::{LogNotifier, Notifier};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with JSON support
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,api=debug,application=debug,actix_web=info".into());

    let is_json = std::env::var("LOG_FORMAT").unwrap_or_default() == "json";

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }

    let config = Config::from_env()?;
    let config_data = web::Data::new(config.clone());
    tracing::info!("Starting ecclesia API server...");

    let db = infrastructure::init_database(&config.database_url, config.database_max_connections)
        .await?;

    if config.run_migrations {
        infrastructure::run_migrations(&db).await?;
    }

    if let Some(admin) = &config.admin {
        EnsureAdminUseCase::execute(&db, &admin.email, &admin.password, &admin.name)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to ensure admin account: {}", e))?;
    }

    let db_data = web::Data::new(db);
    let notifier: web::Data<dyn Notifier> =
        web::Data::from(Arc::new(LogNotifier) as Arc<dyn Notifier>);

    // Global: 100 requests per minute per IP. Credential endpoints: 10.
    let per_ip_rate_limit = PerIpRateLimitMiddleware::new(100);
    let auth_rate_limit = PerIpRateLimitMiddleware::new(10);

    let server_addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", server_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        let auth_limit = auth_rate_limit.clone();

        App::new()
            .wrap(AuthMiddleware)
            .wrap(per_ip_rate_limit.clone())
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .app_data(notifier.clone())
            .configure(move |cfg| api::routes(cfg, auth_limit))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
