use super::sea_orm_active_enums::FieldType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub form_id: Uuid,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    /// JSON array of option labels for choice fields.
    pub options: Option<Json>,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forms::Entity",
        from = "Column::FormId",
        to = "super::forms::Column::Id",
        on_delete = "Cascade"
    )]
    Forms,
    #[sea_orm(has_many = "super::form_answers::Entity")]
    FormAnswers,
}

impl Related<super::forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forms.def()
    }
}

impl Related<super::form_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn option_labels(&self) -> Vec<String> {
        self.options
            .as_ref()
            .and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok())
            .unwrap_or_default()
    }
}
