use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use vocero_entity::assistant_file;

/// Metadata accompanying a file upload.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    /// The name of the uploaded file
    pub file_name: String,
    /// The content type, defaulting to `application/octet-stream`
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub id: Uuid,
    pub assistant_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub platform_file_id: String,
    pub processed: bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

impl From<assistant_file::Model> for FileSummary {
    fn from(value: assistant_file::Model) -> Self {
        Self {
            id: value.id,
            assistant_id: value.assistant_id,
            file_name: value.file_name,
            content_type: value.content_type,
            size: value.size,
            platform_file_id: value.platform_file_id,
            processed: value.processed,
            created_at: value.created_at,
        }
    }
}
