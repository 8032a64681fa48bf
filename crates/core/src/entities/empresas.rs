use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "empresas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_empresas::Entity")]
    UserEmpresas,
}

impl Related<super::user_empresas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserEmpresas.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_empresas::Relation::Users.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_empresas::Relation::Empresas.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
