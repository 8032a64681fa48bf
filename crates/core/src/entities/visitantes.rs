use super::sea_orm_active_enums::{Culto, Gender};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visitantes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Gender,
    pub age: Option<i32>,
    pub culto: Culto,
    pub visit_date: Date,
    pub first_time: bool,
    pub how_found: Option<String>,
    pub prayer_request: Option<String>,
    pub wants_contact: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
