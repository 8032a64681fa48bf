use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visitantes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visitantes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Visitantes::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Visitantes::Phone).string_len(30))
                    .col(ColumnDef::new(Visitantes::Email).string_len(255))
                    .col(ColumnDef::new(Visitantes::Gender).string_len(16).not_null())
                    .col(ColumnDef::new(Visitantes::Age).integer())
                    .col(ColumnDef::new(Visitantes::Culto).string_len(16).not_null())
                    .col(ColumnDef::new(Visitantes::VisitDate).date().not_null())
                    .col(ColumnDef::new(Visitantes::FirstTime).boolean().not_null().default(true))
                    .col(ColumnDef::new(Visitantes::HowFound).text())
                    .col(ColumnDef::new(Visitantes::PrayerRequest).text())
                    .col(ColumnDef::new(Visitantes::WantsContact).boolean().not_null().default(false))
                    .col(ColumnDef::new(Visitantes::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Dashboard range queries
        manager
            .create_index(
                Index::create()
                    .name("idx_visitantes_visit_date")
                    .table(Visitantes::Table)
                    .col(Visitantes::VisitDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visitantes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Visitantes {
    Table,
    Id,
    Name,
    Phone,
    Email,
    Gender,
    Age,
    Culto,
    VisitDate,
    FirstTime,
    HowFound,
    PrayerRequest,
    WantsContact,
    CreatedAt,
}
