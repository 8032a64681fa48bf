use crate::auth::dtos::*;
use crate::validation::clean_optional;
use crate::{AppError, AppResult};
use tracing::{info, instrument, warn};
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use ecclesia_core::entities::{sea_orm_active_enums::UserRole, user_empresas, users};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionTrait,
};
use uuid::Uuid;

// ============ Config ============

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration: i64,
}

// ============ Helpers ============

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A concurrent registration can still win the unique email index after the lookup.
pub fn email_taken_or_database(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Validation("Email already registered".to_string())
        }
        _ => AppError::Database(err),
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Cryptographic(format!("Failed to hash password: {}", e)))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Cryptographic(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(config: &AuthConfig, user: &users::Model) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.jwt_expiration)).timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Authentication(format!("JWT encoding error: {}", e)))
}

pub fn decode_token(jwt_secret: &str, token: &str) -> AppResult<Claims> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    Ok(token_data.claims)
}

// ============ Register Use Case ============

pub struct RegisterUseCase;

impl RegisterUseCase {
    #[instrument(skip(db, req), fields(email = %req.email))]
    pub async fn execute(
        db: &DatabaseConnection,
        req: RegisterRequest,
    ) -> AppResult<RegisterResponse> {
        req.validate()?;

        let email = normalize_email(&req.email);
        let password_hash = hash_password(&req.password)?;

        let txn = db.begin().await?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&txn)
            .await?;

        if existing.is_some() {
            warn!("Registration attempt with existing email");
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name.trim().to_string()),
            email: Set(email),
            password_hash: Set(password_hash),
            phone: Set(clean_optional(req.phone)),
            role: Set(UserRole::Member),
            approved: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(email_taken_or_database)?;

        let empresa_id = match req.empresa {
            Some(input) => {
                let empresa = input.into_active_model(Uuid::new_v4()).insert(&txn).await?;

                user_empresas::ActiveModel {
                    user_id: Set(user.id),
                    empresa_id: Set(empresa.id),
                    created_at: Set(now.into()),
                }
                .insert(&txn)
                .await?;

                Some(empresa.id)
            }
            None => None,
        };

        txn.commit().await?;

        info!(user_id = %user.id, "User registered, awaiting approval");

        Ok(RegisterResponse {
            user: user.into(),
            empresa_id,
            message: "Registration received. An administrator must approve your account.".to_string(),
        })
    }
}

// ============ Login Use Case ============

pub struct LoginUseCase;

impl LoginUseCase {
    #[instrument(skip(db, config, req), fields(email = %req.email))]
    pub async fn execute(
        db: &DatabaseConnection,
        config: &AuthConfig,
        req: LoginRequest,
    ) -> AppResult<LoginResponse> {
        req.validate()?;

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(normalize_email(&req.email)))
            .one(db)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(&req.password, &user.password_hash)? {
            warn!("Invalid password attempt");
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        if !user.approved {
            return Err(AppError::Authorization("Account pending approval".to_string()));
        }

        let token = issue_token(config, &user)?;

        Ok(LoginResponse {
            token,
            expires_in: config.jwt_expiration,
            user: user.into(),
        })
    }
}

// ============ Current User Use Case ============

pub struct CurrentUserUseCase;

impl CurrentUserUseCase {
    pub async fn execute(db: &DatabaseConnection, user_id: Uuid) -> AppResult<UserProfile> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        Ok(user.into())
    }
}

// ============ Resolve Actor Use Case ============

pub struct ResolveActorUseCase;

impl ResolveActorUseCase {
    /// Turns verified claims into an actor backed by the stored account.
    ///
    /// Deleted or unapproved accounts are refused, and the role comes from the
    /// database so a demotion applies to tokens already issued.
    pub async fn execute(db: &DatabaseConnection, claims: &Claims) -> AppResult<Actor> {
        let user_id = claims
            .user_id()
            .map_err(|_| AppError::Authentication("Invalid token subject".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .filter(|u| u.approved)
            .ok_or_else(|| AppError::Authentication("Account no longer active".to_string()))?;

        Ok(Actor {
            user_id: user.id,
            role: user.role,
        })
    }
}

// ============ Bootstrap Admin Use Case ============

pub struct EnsureAdminUseCase;

impl EnsureAdminUseCase {
    /// Creates the admin account, or promotes and approves an existing user with that email.
    #[instrument(skip(db, password))]
    pub async fn execute(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
        name: &str,
    ) -> AppResult<users::Model> {
        let email = normalize_email(email);
        let now = Utc::now();

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(db)
            .await?;

        let admin = match existing {
            Some(user) if user.is_admin() && user.approved => user,
            Some(user) => {
                let mut active: users::ActiveModel = user.into();
                active.role = Set(UserRole::Admin);
                active.approved = Set(true);
                active.updated_at = Set(now.into());
                active.update(db).await?
            }
            None => {
                users::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(name.to_string()),
                    email: Set(email),
                    password_hash: Set(hash_password(password)?),
                    phone: Set(None),
                    role: Set(UserRole::Admin),
                    approved: Set(true),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                }
                .insert(db)
                .await?
            }
        };

        info!(user_id = %admin.id, "Admin account ready");
        Ok(admin)
    }
}

