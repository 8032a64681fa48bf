use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration: i64,
    pub server_host: String,
    pub server_port: u16,
    pub auth_cookie_name: String,
    pub cookie_secure: bool,
    pub run_migrations: bool,
    pub admin: Option<AdminBootstrap>,
}

/// Account ensured at startup when `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub name: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(AdminBootstrap {
                    email,
                    password,
                    name: var_or("ADMIN_NAME", "Administrador"),
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: var_or("DATABASE_MAX_CONNECTIONS", "10").parse()?,
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration: var_or("JWT_EXPIRATION", "604800").parse()?,
            server_host: var_or("SERVER_HOST", "0.0.0.0"),
            server_port: var_or("SERVER_PORT", "8080").parse()?,
            auth_cookie_name: var_or("AUTH_COOKIE_NAME", "ecclesia_token"),
            cookie_secure: flag("COOKIE_SECURE", false),
            run_migrations: flag("RUN_MIGRATIONS", true),
            admin,
        })
    }

    pub fn auth_config(&self) -> application::auth::AuthConfig {
        application::auth::AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            jwt_expiration: self.jwt_expiration,
        }
    }
}
