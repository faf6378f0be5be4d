//! Wire types of the voice platform API.

use serde::{Deserialize, Serialize};

/// The definition of an assistant, as the platform expects it.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantDefinition {
    pub name: String,
    pub first_message: String,
    pub model: ModelDefinition,
    pub voice: VoiceDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcriber: Option<TranscriberDefinition>,
    // always serialized, clearing these lists on the platform needs the empty value
    #[serde(default)]
    pub tool_ids: Vec<String>,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    pub provider: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ModelMessage>,
}

impl Default for ModelDefinition {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o".into(),
            messages: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMessage {
    pub role: String,
    pub content: String,
}

impl ModelMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDefinition {
    pub provider: String,
    pub voice_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriberDefinition {
    pub provider: String,
    pub language: String,
}

/// An assistant, as reported back by the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAssistant {
    pub id: String,
    #[serde(flatten)]
    pub definition: AssistantDefinition,
}

/// A knowledge file, as reported back by the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bytes: Option<i64>,
    /// the processing state, `processed` once the platform finished ingesting
    #[serde(default)]
    pub status: Option<String>,
}

impl PlatformFile {
    pub fn is_processed(&self) -> bool {
        self.status.as_deref() == Some("processed")
    }
}

/// The definition of a tool, as the platform expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub r#type: String,
    pub function: ToolFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ToolServer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolFunction {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolServer {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTool {
    pub id: String,
    #[serde(flatten)]
    pub definition: ToolDefinition,
}

/// A request to start a call session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub assistant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A call session, as reported back by the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCall {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_call_url: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_definition_wire_format() {
        let definition = AssistantDefinition {
            name: "support".into(),
            first_message: "Hi, how can I help?".into(),
            model: ModelDefinition {
                messages: vec![ModelMessage::system("You are a support agent.")],
                ..Default::default()
            },
            voice: VoiceDefinition {
                provider: "11labs".into(),
                voice_id: "nova".into(),
            },
            transcriber: Some(TranscriberDefinition {
                provider: "deepgram".into(),
                language: "en".into(),
            }),
            tool_ids: vec![],
            file_ids: vec![],
        };

        assert_eq!(
            serde_json::to_value(&definition).unwrap(),
            json!({
                "name": "support",
                "firstMessage": "Hi, how can I help?",
                "model": {
                    "provider": "openai",
                    "model": "gpt-4o",
                    "messages": [{"role": "system", "content": "You are a support agent."}],
                },
                "voice": {"provider": "11labs", "voiceId": "nova"},
                "transcriber": {"provider": "deepgram", "language": "en"},
                "toolIds": [],
                "fileIds": [],
            })
        );
    }

    #[test]
    fn assistant_response_flattens_definition() {
        let assistant: PlatformAssistant = serde_json::from_value(json!({
            "id": "as-1",
            "name": "support",
            "firstMessage": "Hi",
            "model": {"provider": "openai", "model": "gpt-4o"},
            "voice": {"provider": "11labs", "voiceId": "nova"},
        }))
        .unwrap();

        assert_eq!(assistant.id, "as-1");
        assert_eq!(assistant.definition.name, "support");
    }
}
