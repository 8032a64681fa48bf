use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_responses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub form_id: Uuid,
    pub respondent_email: Option<String>,
    pub respondent_user_id: Option<Uuid>,
    pub submitted_at: DateTimeWithTimeZone,
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
