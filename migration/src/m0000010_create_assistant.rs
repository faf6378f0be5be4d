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
                    .table(Assistant::Table)
                    .col(
                        ColumnDef::new(Assistant::Id)
                            .uuid()
                            .not_null()
                            .default(Func::cust(UuidV4))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assistant::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Assistant::PlatformAssistantId)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assistant::Name).string().not_null())
                    .col(
                        ColumnDef::new(Assistant::WelcomeMessage)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assistant::SystemPrompt).text().not_null())
                    .col(ColumnDef::new(Assistant::Language).string().not_null())
                    .col(ColumnDef::new(Assistant::VoiceId).string().not_null())
                    .col(ColumnDef::new(Assistant::Position).string().not_null())
                    .col(ColumnDef::new(Assistant::Theme).string().not_null())
                    .col(
                        ColumnDef::new(Assistant::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Assistant::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .col(
                        ColumnDef::new(Assistant::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Assistant::Table)
                    .name("by_assistant_user_id")
                    .col(Assistant::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(Assistant::Table)
                    .name("by_assistant_user_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Assistant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Assistant {
    Table,
    Id,
    UserId,
    PlatformAssistantId,
    Name,
    WelcomeMessage,
    SystemPrompt,
    Language,
    VoiceId,
    Position,
    Theme,
    Active,
    CreatedAt,
    UpdatedAt,
}
