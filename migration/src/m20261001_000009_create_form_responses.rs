use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormResponses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FormResponses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FormResponses::FormId).uuid().not_null())
                    .col(ColumnDef::new(FormResponses::RespondentEmail).string_len(255))
                    .col(ColumnDef::new(FormResponses::RespondentUserId).uuid())
                    .col(
                        ColumnDef::new(FormResponses::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_responses_form_id")
                            .from(FormResponses::Table, FormResponses::FormId)
                            .to(Forms::Table, Forms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_form_responses_form_id")
                    .table(FormResponses::Table)
                    .col(FormResponses::FormId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormResponses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormResponses {
    Table,
    Id,
    FormId,
    RespondentEmail,
    RespondentUserId,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Forms {
    Table,
    Id,
}
