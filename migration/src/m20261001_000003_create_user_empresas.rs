use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserEmpresas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserEmpresas::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserEmpresas::EmpresaId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserEmpresas::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserEmpresas::UserId)
                            .col(UserEmpresas::EmpresaId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_empresas_user_id")
                            .from(UserEmpresas::Table, UserEmpresas::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_empresas_empresa_id")
                            .from(UserEmpresas::Table, UserEmpresas::EmpresaId)
                            .to(Empresas::Table, Empresas::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookup: owners of a company
        manager
            .create_index(
                Index::create()
                    .name("idx_user_empresas_empresa_id")
                    .table(UserEmpresas::Table)
                    .col(UserEmpresas::EmpresaId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserEmpresas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserEmpresas {
    Table,
    UserId,
    EmpresaId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Empresas {
    Table,
    Id,
}
