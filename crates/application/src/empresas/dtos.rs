use chrono::{DateTime, Utc};
use ecclesia_core::entities::empresas;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::clean_optional;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmpresaInput {
    #[validate(
        length(max = 150, message = "Name must be at most 150 characters"),
        custom(function = "crate::validation::validate_name")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Segment must be at most 100 characters"))]
    pub segment: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Instagram handle must be at most 100 characters"))]
    pub instagram: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Logo URL must be a valid URL"))]
    pub logo_url: Option<String>,
}

impl EmpresaInput {
    pub fn into_active_model(self, id: Uuid) -> empresas::ActiveModel {
        let now = Utc::now();
        let mut active = empresas::ActiveModel {
            id: Set(id),
            created_at: Set(now.into()),
            ..Default::default()
        };
        self.apply(&mut active);
        active
    }

    /// Overwrites every editable column, including clearing omitted optionals.
    pub fn apply(self, active: &mut empresas::ActiveModel) {
        active.name = Set(self.name.trim().to_string());
        active.description = Set(clean_optional(self.description));
        active.segment = Set(clean_optional(self.segment));
        active.phone = Set(clean_optional(self.phone));
        active.email = Set(clean_optional(self.email).map(|e| e.to_lowercase()));
        active.website = Set(clean_optional(self.website));
        active.instagram = Set(clean_optional(self.instagram));
        active.address = Set(clean_optional(self.address));
        active.logo_url = Set(clean_optional(self.logo_url));
        active.updated_at = Set(Utc::now().into());
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEmpresasQuery {
    /// Matches name or segment
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmpresaResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub segment: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub owner_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmpresaResponse {
    pub fn from_model(model: empresas::Model, owner_ids: Vec<Uuid>) -> Self {
        EmpresaResponse {
            id: model.id,
            name: model.name,
            description: model.description,
            segment: model.segment,
            phone: model.phone,
            email: model.email,
            website: model.website,
            instagram: model.instagram,
            address: model.address,
            logo_url: model.logo_url,
            owner_ids,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmpresaInput {
        EmpresaInput {
            name: "Padaria Pão da Vida".to_string(),
            description: None,
            segment: Some("Alimentação".to_string()),
            phone: Some("(11) 3333-4444".to_string()),
            email: Some("contato@paodavida.com.br".to_string()),
            website: Some("https://paodavida.com.br".to_string()),
            instagram: None,
            address: None,
            logo_url: None,
        }
    }

    #[test]
    fn test_empresa_input_validation() {
        assert!(input().validate().is_ok());

        let mut bad_site = input();
        bad_site.website = Some("paodavida".to_string());
        assert!(bad_site.validate().is_err());

        let mut short_name = input();
        short_name.name = "P".to_string();
        assert!(short_name.validate().is_err());
    }

    #[test]
    fn test_apply_clears_blank_optionals() {
        let mut data = input();
        data.segment = Some("   ".to_string());
        data.email = Some("Contato@PaoDaVida.com.br".to_string());

        let active = data.into_active_model(Uuid::new_v4());
        assert_eq!(active.segment, Set(None));
        assert_eq!(active.email, Set(Some("contato@paodavida.com.br".to_string())));
    }
}
