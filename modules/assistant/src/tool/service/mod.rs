use crate::{
    tool::model::{ToolRequest, ToolSummary},
    Error,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::instrument;
use uuid::Uuid;
use vocero_common::db::Database;
use vocero_entity::assistant;
use vocero_module_platform::PlatformClient;

#[derive(Clone, Debug)]
pub struct ToolService {
    db: Database,
    platform: PlatformClient,
}

impl ToolService {
    pub fn new(db: Database, platform: PlatformClient) -> Self {
        Self { db, platform }
    }

    /// Create a tool on the platform and attach it to the assistant.
    #[instrument(skip(self, request), err)]
    pub async fn create(
        &self,
        user_id: &str,
        assistant_id: Uuid,
        request: ToolRequest,
    ) -> Result<ToolSummary, Error> {
        if request.name.trim().is_empty() {
            return Err(Error::BadRequest("tool name must not be empty".into()));
        }

        let Some(assistant) = self.fetch_assistant(user_id, assistant_id).await? else {
            return Err(Error::NotFound);
        };

        let tool = self.platform.create_tool(&request.to_definition()).await?;

        let mut definition = self
            .platform
            .get_assistant(&assistant.platform_assistant_id)
            .await?
            .definition;
        definition.tool_ids.push(tool.id.clone());
        self.platform
            .update_assistant(&assistant.platform_assistant_id, &definition)
            .await?;

        Ok(ToolSummary {
            id: tool.id,
            name: tool.definition.function.name,
            description: tool.definition.function.description,
        })
    }

    /// Detach a tool from the assistant and delete it on the platform.
    #[instrument(skip(self), err)]
    pub async fn delete(
        &self,
        user_id: &str,
        assistant_id: Uuid,
        tool_id: &str,
    ) -> Result<(), Error> {
        let Some(assistant) = self.fetch_assistant(user_id, assistant_id).await? else {
            return Err(Error::NotFound);
        };

        let mut definition = self
            .platform
            .get_assistant(&assistant.platform_assistant_id)
            .await?
            .definition;
        definition.tool_ids.retain(|id| id != tool_id);
        self.platform
            .update_assistant(&assistant.platform_assistant_id, &definition)
            .await?;

        self.platform.delete_tool(tool_id).await?;

        Ok(())
    }

    async fn fetch_assistant(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<assistant::Model>, Error> {
        Ok(assistant::Entity::find_by_id(id)
            .filter(assistant::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }
}
