use chrono::{DateTime, NaiveDate, Utc};
use ecclesia_core::entities::{
    sea_orm_active_enums::{Culto, Gender},
    visitantes,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterVisitorRequest {
    #[validate(
        length(max = 120, message = "Name must be at most 120 characters"),
        custom(function = "crate::validation::validate_name")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    #[validate(range(min = 0, max = 120, message = "Age must be between 0-120"))]
    pub age: Option<i32>,
    pub culto: Culto,
    /// Defaults to today
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub first_time: bool,
    #[serde(default)]
    #[validate(length(max = 200, message = "Must be at most 200 characters"))]
    pub how_found: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Prayer request must be at most 2000 characters"))]
    pub prayer_request: Option<String>,
    #[serde(default)]
    pub wants_contact: bool,
}

fn default_true() -> bool {
    true
}

/// Inclusive visit-date range. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn validate(&self) -> Result<(), AppError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(AppError::Validation(
                "start must be on or before end".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListVisitorsQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub culto: Option<Culto>,
}

impl ListVisitorsQuery {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitorResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Gender,
    pub age: Option<i32>,
    pub culto: Culto,
    pub visit_date: NaiveDate,
    pub first_time: bool,
    pub how_found: Option<String>,
    pub prayer_request: Option<String>,
    pub wants_contact: bool,
    pub created_at: DateTime<Utc>,
}

impl From<visitantes::Model> for VisitorResponse {
    fn from(v: visitantes::Model) -> Self {
        VisitorResponse {
            id: v.id,
            name: v.name,
            phone: v.phone,
            email: v.email,
            gender: v.gender,
            age: v.age,
            culto: v.culto,
            visit_date: v.visit_date,
            first_time: v.first_time,
            how_found: v.how_found,
            prayer_request: v.prayer_request,
            wants_contact: v.wants_contact,
            created_at: v.created_at.with_timezone(&Utc),
        }
    }
}

// ============ Dashboard ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderByCulto {
    pub culto: Culto,
    pub masculino: u64,
    pub feminino: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBracketCount {
    pub bracket: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDistribution {
    pub brackets: Vec<AgeBracketCount>,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub visitors: u64,
    pub first_time_visitors: u64,
    pub pending_users: u64,
    pub grupos: u64,
    pub empresas: u64,
    pub published_forms: u64,
}
