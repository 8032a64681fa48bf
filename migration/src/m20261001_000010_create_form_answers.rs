use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormAnswers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FormAnswers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FormAnswers::ResponseId).uuid().not_null())
                    .col(ColumnDef::new(FormAnswers::FieldId).uuid())
                    .col(ColumnDef::new(FormAnswers::FieldLabel).string_len(200).not_null())
                    .col(ColumnDef::new(FormAnswers::Value).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_answers_response_id")
                            .from(FormAnswers::Table, FormAnswers::ResponseId)
                            .to(FormResponses::Table, FormResponses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Answers outlive field replacement; the label snapshot keeps them readable
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_answers_field_id")
                            .from(FormAnswers::Table, FormAnswers::FieldId)
                            .to(FormFields::Table, FormFields::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormAnswers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormAnswers {
    Table,
    Id,
    ResponseId,
    FieldId,
    FieldLabel,
    Value,
}

#[derive(DeriveIden)]
enum FormResponses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum FormFields {
    Table,
    Id,
}
