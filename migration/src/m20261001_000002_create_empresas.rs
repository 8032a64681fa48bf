use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Empresas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Empresas::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Empresas::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Empresas::Description).text())
                    .col(ColumnDef::new(Empresas::Segment).string_len(100))
                    .col(ColumnDef::new(Empresas::Phone).string_len(30))
                    .col(ColumnDef::new(Empresas::Email).string_len(255))
                    .col(ColumnDef::new(Empresas::Website).text())
                    .col(ColumnDef::new(Empresas::Instagram).string_len(100))
                    .col(ColumnDef::new(Empresas::Address).text())
                    .col(ColumnDef::new(Empresas::LogoUrl).text())
                    .col(ColumnDef::new(Empresas::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Empresas::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Empresas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Empresas {
    Table,
    Id,
    Name,
    Description,
    Segment,
    Phone,
    Email,
    Website,
    Instagram,
    Address,
    LogoUrl,
    CreatedAt,
    UpdatedAt,
}
