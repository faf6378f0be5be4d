use utoipa::ToSchema;
use vocero_module_platform::model::{ToolDefinition, ToolFunction, ToolServer};

/// The payload to create a tool for an assistant.
///
/// Tools live on the voice platform only, there is no local record of them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolRequest {
    pub name: String,
    pub description: String,
    /// A webhook the platform calls when the assistant invokes the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// The JSON schema of the tool parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub parameters: Option<serde_json::Value>,
}

impl ToolRequest {
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            r#type: "function".to_string(),
            function: ToolFunction {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: self.parameters.clone(),
            },
            server: self
                .server_url
                .clone()
                .map(|url| ToolServer { url }),
        }
    }
}

/// A tool as reported back by the platform.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}
