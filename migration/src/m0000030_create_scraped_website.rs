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
                    .table(ScrapedWebsite::Table)
                    .col(
                        ColumnDef::new(ScrapedWebsite::Id)
                            .uuid()
                            .not_null()
                            .default(Func::cust(UuidV4))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapedWebsite::UserId).string().not_null())
                    .col(
                        ColumnDef::new(ScrapedWebsite::AssistantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapedWebsite::Url).string().not_null())
                    .col(ColumnDef::new(ScrapedWebsite::Status).string().not_null())
                    .col(ColumnDef::new(ScrapedWebsite::JobId).string())
                    .col(ColumnDef::new(ScrapedWebsite::PageCount).integer())
                    .col(ColumnDef::new(ScrapedWebsite::ContentBytes).big_integer())
                    .col(ColumnDef::new(ScrapedWebsite::Error).string())
                    .col(
                        ColumnDef::new(ScrapedWebsite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .col(
                        ColumnDef::new(ScrapedWebsite::FinishedAt).timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScrapedWebsite::Table, ScrapedWebsite::AssistantId)
                            .to(Assistant::Table, Assistant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ScrapedWebsite::Table)
                    .name("by_scraped_website_user_id")
                    .col(ScrapedWebsite::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(ScrapedWebsite::Table)
                    .name("by_scraped_website_user_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ScrapedWebsite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScrapedWebsite {
    Table,
    Id,
    UserId,
    AssistantId,
    Url,
    Status,
    JobId,
    PageCount,
    ContentBytes,
    Error,
    CreatedAt,
    FinishedAt,
}
