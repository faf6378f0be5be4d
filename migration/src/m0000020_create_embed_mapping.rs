use crate::m0000010_create_assistant::Assistant;
use crate::{Now, UuidV4};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmbedMapping::Table)
                    .col(
                        ColumnDef::new(EmbedMapping::Id)
                            .uuid()
                            .not_null()
                            .default(Func::cust(UuidV4))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmbedMapping::UserId).string().not_null())
                    .col(
                        ColumnDef::new(EmbedMapping::EmbedId)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmbedMapping::AssistantId).uuid().not_null())
                    .col(
                        ColumnDef::new(EmbedMapping::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(EmbedMapping::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EmbedMapping::Table, EmbedMapping::AssistantId)
                            .to(Assistant::Table, Assistant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmbedMapping::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmbedMapping {
    Table,
    Id,
    UserId,
    EmbedId,
    AssistantId,
    Active,
    CreatedAt,
}
