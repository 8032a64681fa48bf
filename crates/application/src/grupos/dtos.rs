use chrono::{DateTime, Utc};
use ecclesia_core::entities::{grupos, users};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const WEEKDAYS: [&str; 7] = [
    "domingo", "segunda", "terca", "quarta", "quinta", "sexta", "sabado",
];

fn validate_weekday(day: &str) -> Result<(), validator::ValidationError> {
    if WEEKDAYS.contains(&day) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_weekday")
            .with_message("Unknown weekday".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrupoInput {
    #[validate(
        length(max = 120, message = "Name must be at most 120 characters"),
        custom(function = "crate::validation::validate_name")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_weekday"))]
    pub weekday: String,
    #[validate(custom(function = "crate::validation::validate_meeting_time"))]
    pub meeting_time: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Neighborhood must be at most 100 characters"))]
    pub neighborhood: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub leader_ids: Vec<Uuid>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct ListGruposQuery {
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderDto {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
}

impl From<users::Model> for LeaderDto {
    fn from(user: users::Model) -> Self {
        LeaderDto {
            id: user.id,
            name: user.name,
            phone: user.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrupoResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub weekday: String,
    pub meeting_time: String,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub leaders: Vec<LeaderDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GrupoResponse {
    pub fn from_model(model: grupos::Model, leaders: Vec<LeaderDto>) -> Self {
        GrupoResponse {
            id: model.id,
            name: model.name,
            description: model.description,
            weekday: model.weekday,
            meeting_time: model.meeting_time,
            address: model.address,
            neighborhood: model.neighborhood,
            image_url: model.image_url,
            active: model.active,
            leaders,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
