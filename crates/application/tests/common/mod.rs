#![allow(dead_code)]

use application::auth::dtos::Actor;
use application::auth::use_cases::hash_password;
use chrono::Utc;
use ecclesia_core::entities::{sea_orm_active_enums::UserRole, users};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

/// Fresh in-memory database with every migration applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    // One shared connection, otherwise each pool member sees its own empty database
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    role: UserRole,
    approved: bool,
) -> users::Model {
    let now = Utc::now();
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(email.split('@').next().unwrap_or("user").to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password("senha-forte-123").expect("Failed to hash")),
        phone: Set(None),
        role: Set(role),
        approved: Set(approved),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

pub fn actor(user: &users::Model) -> Actor {
    Actor {
        user_id: user.id,
        role: user.role,
    }
}
