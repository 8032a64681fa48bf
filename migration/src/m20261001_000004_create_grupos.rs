use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grupos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Grupos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Grupos::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Grupos::Description).text())
                    .col(ColumnDef::new(Grupos::Weekday).string_len(20).not_null())
                    .col(ColumnDef::new(Grupos::MeetingTime).string_len(10).not_null())
                    .col(ColumnDef::new(Grupos::Address).text())
                    .col(ColumnDef::new(Grupos::Neighborhood).string_len(100))
                    .col(ColumnDef::new(Grupos::ImageUrl).text())
                    .col(ColumnDef::new(Grupos::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Grupos::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Grupos::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grupos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Grupos {
    Table,
    Id,
    Name,
    Description,
    Weekday,
    MeetingTime,
    Address,
    Neighborhood,
    ImageUrl,
    Active,
    CreatedAt,
    UpdatedAt,
}
