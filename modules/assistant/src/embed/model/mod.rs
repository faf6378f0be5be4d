use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use vocero_entity::{assistant, embed_mapping};

/// The payload to create an embed mapping.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbedRequest {
    pub assistant_id: Uuid,
}

/// The payload to change an embed mapping.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbedUpdate {
    /// Point the embed at another assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<Uuid>,
    /// Enable or disable the embed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbedSummary {
    pub id: Uuid,
    pub embed_id: String,
    pub assistant_id: Uuid,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

impl From<embed_mapping::Model> for EmbedSummary {
    fn from(value: embed_mapping::Model) -> Self {
        Self {
            id: value.id,
            embed_id: value.embed_id,
            assistant_id: value.assistant_id,
            active: value.active,
            created_at: value.created_at,
        }
    }
}

/// What the widget needs to render and connect, fetched anonymously by embed id.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    pub platform_assistant_id: String,
    pub name: String,
    pub welcome_message: String,
    pub language: String,
    pub voice_id: String,
    pub position: String,
    pub theme: String,
}

impl From<assistant::Model> for EmbedConfig {
    fn from(value: assistant::Model) -> Self {
        Self {
            platform_assistant_id: value.platform_assistant_id,
            name: value.name,
            welcome_message: value.welcome_message,
            language: value.language,
            voice_id: value.voice_id,
            position: value.position,
            theme: value.theme,
        }
    }
}
