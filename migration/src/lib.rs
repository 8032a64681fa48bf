pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_empresas;
mod m20261001_000003_create_user_empresas;
mod m20261001_000004_create_grupos;
mod m20261001_000005_create_grupo_lideres;
mod m20261001_000006_create_visitantes;
mod m20261001_000007_create_forms;
mod m20261001_000008_create_form_fields;
mod m20261001_000009_create_form_responses;
mod m20261001_000010_create_form_answers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_empresas::Migration),
            Box::new(m20261001_000003_create_user_empresas::Migration),
            Box::new(m20261001_000004_create_grupos::Migration),
            Box::new(m20261001_000005_create_grupo_lideres::Migration),
            Box::new(m20261001_000006_create_visitantes::Migration),
            Box::new(m20261001_000007_create_forms::Migration),
            Box::new(m20261001_000008_create_form_fields::Migration),
            Box::new(m20261001_000009_create_form_responses::Migration),
            Box::new(m20261001_000010_create_form_answers::Migration),
        ]
    }
}
