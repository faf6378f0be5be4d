use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use vocero_entity::scraped_website::{self, Status};

/// Request to scrape a website into an assistant's knowledge.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    /// The assistant the scraped content gets attached to
    pub assistant_id: Uuid,
    /// The site to scrape
    pub url: String,
}

/// The persisted state of a scrape job.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeSummary {
    pub id: Uuid,
    pub assistant_id: Uuid,
    pub url: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub finished_at: Option<OffsetDateTime>,
}

impl From<scraped_website::Model> for ScrapeSummary {
    fn from(value: scraped_website::Model) -> Self {
        Self {
            id: value.id,
            assistant_id: value.assistant_id,
            url: value.url,
            status: value.status,
            page_count: value.page_count,
            content_bytes: value.content_bytes,
            error: value.error,
            created_at: value.created_at,
            finished_at: value.finished_at,
        }
    }
}
