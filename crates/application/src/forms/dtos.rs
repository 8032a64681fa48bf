use chrono::{DateTime, Utc};
use ecclesia_core::entities::{
    form_answers, form_fields, forms,
    sea_orm_active_enums::{FieldType, FormStatus, FormVisibility},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============ Field definitions ============

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FieldInput {
    #[validate(length(min = 1, max = 200, message = "Label must be between 1-200 characters"))]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    #[validate(length(max = 200, message = "Placeholder must be at most 200 characters"))]
    pub placeholder: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Help text must be at most 1000 characters"))]
    pub help_text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Position in the form. Falls back to the array index.
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDto {
    pub id: Uuid,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub options: Vec<String>,
    pub order: i32,
}

impl From<form_fields::Model> for FieldDto {
    fn from(field: form_fields::Model) -> Self {
        let options = field.option_labels();
        FieldDto {
            id: field.id,
            label: field.label,
            field_type: field.field_type,
            required: field.required,
            placeholder: field.placeholder,
            help_text: field.help_text,
            options,
            order: field.order,
        }
    }
}

// ============ Form create / update ============

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFormRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1-200 characters"),
        custom(function = "crate::validation::validate_not_blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<FormStatus>,
    #[serde(default)]
    pub visibility: Option<FormVisibility>,
    #[serde(default)]
    pub require_auth: bool,
    #[serde(default)]
    pub email_enabled: bool,
    #[serde(default)]
    #[validate(length(max = 200, message = "Email subject must be at most 200 characters"))]
    pub email_subject: Option<String>,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Email body must be at most 10000 characters"))]
    pub email_body: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldInput>,
}

/// Partial update. Omitted properties keep their value; `fields`, when present, replaces every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFormRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1-200 characters"),
        custom(function = "crate::validation::validate_not_blank")
    )]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<FormStatus>,
    #[serde(default)]
    pub visibility: Option<FormVisibility>,
    #[serde(default)]
    pub require_auth: Option<bool>,
    #[serde(default)]
    pub email_enabled: Option<bool>,
    #[serde(default)]
    #[validate(length(max = 200, message = "Email subject must be at most 200 characters"))]
    pub email_subject: Option<String>,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Email body must be at most 10000 characters"))]
    pub email_body: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldInput>>,
}

// ============ Form reads ============

#[derive(Debug, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: Uuid,
    pub title: String,
    pub status: FormStatus,
    pub visibility: FormVisibility,
    pub public_token: String,
    pub private_token: String,
    pub field_count: u64,
    pub response_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormDetail {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: FormStatus,
    pub visibility: FormVisibility,
    pub require_auth: bool,
    pub email_enabled: bool,
    pub email_subject: Option<String>,
    pub email_body: Option<String>,
    pub public_token: String,
    pub private_token: String,
    pub created_by_id: Option<Uuid>,
    pub fields: Vec<FieldDto>,
    pub response_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormDetail {
    pub fn from_parts(form: forms::Model, fields: Vec<form_fields::Model>, response_count: u64) -> Self {
        FormDetail {
            id: form.id,
            title: form.title,
            description: form.description,
            status: form.status,
            visibility: form.visibility,
            require_auth: form.require_auth,
            email_enabled: form.email_enabled,
            email_subject: form.email_subject,
            email_body: form.email_body,
            public_token: form.public_token,
            private_token: form.private_token,
            created_by_id: form.created_by_id,
            fields: fields.into_iter().map(Into::into).collect(),
            response_count,
            created_at: form.created_at.with_timezone(&Utc),
            updated_at: form.updated_at.with_timezone(&Utc),
        }
    }
}

/// What respondents see at `/f/{token}`. Tokens and email settings stay private.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicFormView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub require_auth: bool,
    pub fields: Vec<FieldDto>,
}

// ============ Responses ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInput {
    pub field_id: Uuid,
    /// String for most fields, array of strings for checkboxes
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitResponseRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub respondent_email: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub response_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerDto {
    pub field_id: Option<Uuid>,
    pub field_label: String,
    pub value: String,
}

impl From<form_answers::Model> for AnswerDto {
    fn from(answer: form_answers::Model) -> Self {
        AnswerDto {
            field_id: answer.field_id,
            field_label: answer.field_label,
            value: answer.value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionDto {
    pub id: Uuid,
    pub respondent_email: Option<String>,
    pub respondent_user_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerDto>,
}
