use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_answers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub response_id: Uuid,
    /// Nulled when the field is replaced by a later form edit.
    pub field_id: Option<Uuid>,
    pub field_label: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_responses::Entity",
        from = "Column::ResponseId",
        to = "super::form_responses::Column::Id",
        on_delete = "Cascade"
    )]
    FormResponses,
    #[sea_orm(
        belongs_to = "super::form_fields::Entity",
        from = "Column::FieldId",
        to = "super::form_fields::Column::Id",
        on_delete = "SetNull"
    )]
    FormFields,
}

impl Related<super::form_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormResponses.def()
    }
}

impl Related<super::form_fields::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormFields.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
