use super::sea_orm_active_enums::{FormStatus, FormVisibility};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: FormStatus,
    pub visibility: FormVisibility,
    pub require_auth: bool,
    pub email_enabled: bool,
    pub email_subject: Option<String>,
    pub email_body: Option<String>,
    #[sea_orm(unique)]
    pub public_token: String,
    #[sea_orm(unique)]
    pub private_token: String,
    pub created_by_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Users,
    #[sea_orm(has_many = "super::form_fields::Entity")]
    FormFields,
    #[sea_orm(has_many = "super::form_responses::Entity")]
    FormResponses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::form_fields::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormFields.def()
    }
}

impl Related<super::form_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
