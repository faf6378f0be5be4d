use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scraped_website")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: String,
    pub assistant_id: Uuid,

    pub url: String,
    pub status: Status,

    /// the job identifier assigned by the crawl provider
    pub job_id: Option<String>,

    pub page_count: Option<i32>,
    pub content_bytes: Option<i64>,
    pub error: Option<String>,

    pub created_at: time::OffsetDateTime,
    pub finished_at: Option<time::OffsetDateTime>,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    EnumIter,
    DeriveActiveEnum,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "queued")]
    Queued,
    #[sea_orm(string_value = "scraping")]
    Scraping,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assistant::Entity",
        from = "Column::AssistantId",
        to = "super::assistant::Column::Id"
    )]
    Assistant,
}

impl Related<super::assistant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assistant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_serde() {
        assert_eq!(
            serde_json::to_value(Status::Scraping).unwrap(),
            serde_json::json!("scraping")
        );
        assert_eq!(
            serde_json::from_value::<Status>(serde_json::json!("failed")).unwrap(),
            Status::Failed
        );
    }
}
