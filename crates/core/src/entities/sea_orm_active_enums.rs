use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormVisibility {
    #[sea_orm(string_value = "PUBLIC")]
    Public,
    #[sea_orm(string_value = "PRIVATE")]
    Private,
}

/// Kinds of input a form field can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    #[sea_orm(string_value = "TEXT")]
    Text,
    #[sea_orm(string_value = "TEXTAREA")]
    Textarea,
    #[sea_orm(string_value = "EMAIL")]
    Email,
    #[sea_orm(string_value = "NUMBER")]
    Number,
    #[sea_orm(string_value = "PHONE")]
    Phone,
    #[sea_orm(string_value = "DATE")]
    Date,
    #[sea_orm(string_value = "SELECT")]
    Select,
    #[sea_orm(string_value = "CHECKBOX")]
    Checkbox,
}

impl FieldType {
    /// Choice fields must carry a non-empty option list.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Checkbox)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    #[sea_orm(string_value = "MASCULINO")]
    Masculino,
    #[sea_orm(string_value = "FEMININO")]
    Feminino,
}

/// Service time-slot ("culto") a visitor attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Culto {
    #[sea_orm(string_value = "sabado")]
    #[serde(rename = "sabado")]
    Sabado,
    #[sea_orm(string_value = "domingo-manha")]
    #[serde(rename = "domingo-manha")]
    DomingoManha,
    #[sea_orm(string_value = "domingo-noite")]
    #[serde(rename = "domingo-noite")]
    DomingoNoite,
}

impl Culto {
    pub const ALL: [Culto; 3] = [Culto::Sabado, Culto::DomingoManha, Culto::DomingoNoite];
}
