use super::sea_orm_active_enums::UserRole;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub approved: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_empresas::Entity")]
    UserEmpresas,
    #[sea_orm(has_many = "super::grupo_lideres::Entity")]
    GrupoLideres,
    #[sea_orm(has_many = "super::forms::Entity")]
    Forms,
}

impl Related<super::user_empresas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserEmpresas.def()
    }
}

impl Related<super::grupo_lideres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GrupoLideres.def()
    }
}

impl Related<super::forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forms.def()
    }
}

impl Related<super::empresas::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_empresas::Relation::Empresas.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_empresas::Relation::Users.def().rev())
    }
}

impl Related<super::grupos::Entity> for Entity {
    fn to() -> RelationDef {
        super::grupo_lideres::Relation::Grupos.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::grupo_lideres::Relation::Users.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
