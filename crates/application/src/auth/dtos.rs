use chrono::{DateTime, Utc};
use ecclesia_core::entities::{sea_orm_active_enums::UserRole, users};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::empresas::dtos::EmpresaInput;

// ============ JWT Claims ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

// ============ Registration ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(max = 120, message = "Name must be at most 120 characters"),
        custom(function = "crate::validation::validate_name")
    )]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be between 8-128 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: Option<String>,
    /// Company to create and link to the new user
    #[serde(default)]
    #[validate(nested)]
    pub empresa: Option<EmpresaInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
    pub empresa_id: Option<Uuid>,
    pub message: String,
}

// ============ Login ============

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

// ============ Profile ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserProfile {
    fn from(user: users::Model) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            approved: user.approved,
            created_at: user.created_at.with_timezone(&Utc),
        }
    }
}

// ============ Actor ============

/// Authenticated caller, resolved from verified claims and the stored account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
