use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grupos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub weekday: String,
    pub meeting_time: String,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grupo_lideres::Entity")]
    GrupoLideres,
}

impl Related<super::grupo_lideres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GrupoLideres.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::grupo_lideres::Relation::Users.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::grupo_lideres::Relation::Grupos.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
