use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use vocero_entity::assistant;
use vocero_module_platform::model::{
    AssistantDefinition, ModelDefinition, ModelMessage, TranscriberDefinition, VoiceDefinition,
};

/// The payload to create or replace an assistant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub name: String,
    pub welcome_message: String,
    pub system_prompt: String,
    pub language: String,
    pub voice_id: String,
    /// widget placement, e.g. `bottom-right`
    #[serde(default = "default::position")]
    pub position: String,
    #[serde(default = "default::theme")]
    pub theme: String,
    #[serde(default = "default::active")]
    pub active: bool,
}

mod default {
    pub(super) fn position() -> String {
        "bottom-right".to_string()
    }

    pub(super) fn theme() -> String {
        "light".to_string()
    }

    pub(super) const fn active() -> bool {
        true
    }
}

impl AssistantRequest {
    /// Translate the request into the platform's assistant shape.
    pub fn to_definition(&self) -> AssistantDefinition {
        AssistantDefinition {
            name: self.name.clone(),
            first_message: self.welcome_message.clone(),
            model: ModelDefinition {
                messages: vec![ModelMessage::system(&self.system_prompt)],
                ..Default::default()
            },
            voice: VoiceDefinition {
                provider: "11labs".to_string(),
                voice_id: self.voice_id.clone(),
            },
            transcriber: Some(TranscriberDefinition {
                provider: "deepgram".to_string(),
                language: self.language.clone(),
            }),
            tool_ids: Vec::new(),
            file_ids: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantSummary {
    pub id: Uuid,
    pub name: String,
    pub welcome_message: String,
    pub system_prompt: String,
    pub language: String,
    pub voice_id: String,
    pub position: String,
    pub theme: String,
    pub active: bool,
    pub platform_assistant_id: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: OffsetDateTime,
}

impl From<assistant::Model> for AssistantSummary {
    fn from(value: assistant::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            welcome_message: value.welcome_message,
            system_prompt: value.system_prompt,
            language: value.language,
            voice_id: value.voice_id,
            position: value.position,
            theme: value.theme,
            active: value.active,
            platform_assistant_id: value.platform_assistant_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
