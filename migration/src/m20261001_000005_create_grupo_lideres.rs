use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GrupoLideres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GrupoLideres::GrupoId).uuid().not_null())
                    .col(ColumnDef::new(GrupoLideres::UserId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(GrupoLideres::GrupoId)
                            .col(GrupoLideres::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grupo_lideres_grupo_id")
                            .from(GrupoLideres::Table, GrupoLideres::GrupoId)
                            .to(Grupos::Table, Grupos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grupo_lideres_user_id")
                            .from(GrupoLideres::Table, GrupoLideres::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GrupoLideres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GrupoLideres {
    Table,
    GrupoId,
    UserId,
}

#[derive(DeriveIden)]
enum Grupos {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
