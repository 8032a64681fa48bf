use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Forms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Forms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Forms::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Forms::Description).text())
                    .col(ColumnDef::new(Forms::Status).string_len(16).not_null().default("DRAFT"))
                    .col(ColumnDef::new(Forms::Visibility).string_len(16).not_null().default("PUBLIC"))
                    .col(ColumnDef::new(Forms::RequireAuth).boolean().not_null().default(false))
                    .col(ColumnDef::new(Forms::EmailEnabled).boolean().not_null().default(false))
                    .col(ColumnDef::new(Forms::EmailSubject).string_len(200))
                    .col(ColumnDef::new(Forms::EmailBody).text())
                    .col(ColumnDef::new(Forms::PublicToken).string_len(64).not_null().unique_key())
                    .col(ColumnDef::new(Forms::PrivateToken).string_len(64).not_null().unique_key())
                    .col(ColumnDef::new(Forms::CreatedById).uuid())
                    .col(ColumnDef::new(Forms::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Forms::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forms_created_by_id")
                            .from(Forms::Table, Forms::CreatedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Forms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Forms {
    Table,
    Id,
    Title,
    Description,
    Status,
    Visibility,
    RequireAuth,
    EmailEnabled,
    EmailSubject,
    EmailBody,
    PublicToken,
    PrivateToken,
    CreatedById,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
