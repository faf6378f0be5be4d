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
                    .table(AssistantFile::Table)
                    .col(
                        ColumnDef::new(AssistantFile::Id)
                            .uuid()
                            .not_null()
                            .default(Func::cust(UuidV4))
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssistantFile::AssistantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssistantFile::UserId).string().not_null())
                    .col(ColumnDef::new(AssistantFile::FileName).string().not_null())
                    .col(
                        ColumnDef::new(AssistantFile::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssistantFile::Size).big_integer().not_null())
                    .col(
                        ColumnDef::new(AssistantFile::PlatformFileId)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssistantFile::Processed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssistantFile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssistantFile::Table, AssistantFile::AssistantId)
                            .to(Assistant::Table, Assistant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssistantFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AssistantFile {
    Table,
    Id,
    AssistantId,
    UserId,
    FileName,
    ContentType,
    Size,
    PlatformFileId,
    Processed,
    CreatedAt,
}
