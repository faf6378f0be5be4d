use utoipa::ToSchema;
use uuid::Uuid;

/// Request to start a call session with an assistant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartCallRequest {
    pub assistant_id: Uuid,
    /// Free-form metadata attached to the call session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
}
