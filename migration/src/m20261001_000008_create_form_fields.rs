use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormFields::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FormFields::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FormFields::FormId).uuid().not_null())
                    .col(ColumnDef::new(FormFields::Label).string_len(200).not_null())
                    .col(ColumnDef::new(FormFields::FieldType).string_len(16).not_null())
                    .col(ColumnDef::new(FormFields::Required).boolean().not_null().default(false))
                    .col(ColumnDef::new(FormFields::Placeholder).string_len(200))
                    .col(ColumnDef::new(FormFields::HelpText).text())
                    .col(ColumnDef::new(FormFields::Options).json())
                    .col(ColumnDef::new(FormFields::Order).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_form_fields_form_id")
                            .from(FormFields::Table, FormFields::FormId)
                            .to(Forms::Table, Forms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One position per slot within a form
        manager
            .create_index(
                Index::create()
                    .name("idx_form_fields_form_id_order")
                    .table(FormFields::Table)
                    .col(FormFields::FormId)
                    .col(FormFields::Order)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormFields::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FormFields {
    Table,
    Id,
    FormId,
    Label,
    FieldType,
    Required,
    Placeholder,
    HelpText,
    Options,
    Order,
}

#[derive(DeriveIden)]
enum Forms {
    Table,
    Id,
}
