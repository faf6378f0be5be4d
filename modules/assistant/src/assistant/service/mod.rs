#[cfg(test)]
mod test;

use crate::{
    assistant::model::{AssistantRequest, AssistantSummary},
    Error,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;
use vocero_common::{
    db::{limiter::LimiterTrait, Database},
    model::{Paginated, PaginatedResults},
};
use vocero_entity::assistant;
use vocero_module_platform::PlatformClient;

#[derive(Clone, Debug)]
pub struct AssistantService {
    db: Database,
    platform: PlatformClient,
}

impl AssistantService {
    pub fn new(db: Database, platform: PlatformClient) -> Self {
        Self { db, platform }
    }

    /// Create the assistant on the voice platform, then record it.
    #[instrument(skip(self, request), err)]
    pub async fn create(
        &self,
        user_id: &str,
        request: AssistantRequest,
    ) -> Result<AssistantSummary, Error> {
        if request.name.trim().is_empty() {
            return Err(Error::BadRequest("assistant name must not be empty".into()));
        }

        let created = self
            .platform
            .create_assistant(&request.to_definition())
            .await?;

        let now = OffsetDateTime::now_utc();
        let model = assistant::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            platform_assistant_id: Set(created.id),
            name: Set(request.name),
            welcome_message: Set(request.welcome_message),
            system_prompt: Set(request.system_prompt),
            language: Set(request.language),
            voice_id: Set(request.voice_id),
            position: Set(request.position),
            theme: Set(request.theme),
            active: Set(request.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        log::info!("assistant created: {} ({})", model.id, model.platform_assistant_id);

        Ok(model.into())
    }

    pub async fn list(
        &self,
        user_id: &str,
        paginated: Paginated,
    ) -> Result<PaginatedResults<AssistantSummary>, Error> {
        let limiter = assistant::Entity::find()
            .filter(assistant::Column::UserId.eq(user_id))
            .order_by_desc(assistant::Column::CreatedAt)
            .limiting(&self.db, paginated.offset, paginated.limit);

        let total = limiter.total().await?;

        Ok(PaginatedResults {
            total,
            items: limiter
                .fetch()
                .await?
                .into_iter()
                .map(AssistantSummary::from)
                .collect(),
        })
    }

    pub async fn get(&self, user_id: &str, id: Uuid) -> Result<Option<AssistantSummary>, Error> {
        Ok(self
            .fetch(user_id, id)
            .await?
            .map(AssistantSummary::from))
    }

    /// Replace the assistant, on the platform and in the record.
    ///
    /// Knowledge files and tools attached on the platform side are carried over.
    #[instrument(skip(self, request), err)]
    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        request: AssistantRequest,
    ) -> Result<AssistantSummary, Error> {
        let Some(current) = self.fetch(user_id, id).await? else {
            return Err(Error::NotFound);
        };

        let remote = self
            .platform
            .get_assistant(&current.platform_assistant_id)
            .await?;

        let mut definition = request.to_definition();
        definition.tool_ids = remote.definition.tool_ids;
        definition.file_ids = remote.definition.file_ids;

        self.platform
            .update_assistant(&current.platform_assistant_id, &definition)
            .await?;

        let model = assistant::ActiveModel {
            id: Unchanged(current.id),
            name: Set(request.name),
            welcome_message: Set(request.welcome_message),
            system_prompt: Set(request.system_prompt),
            language: Set(request.language),
            voice_id: Set(request.voice_id),
            position: Set(request.position),
            theme: Set(request.theme),
            active: Set(request.active),
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(model.into())
    }

    /// Remove the assistant from the platform and drop the record.
    ///
    /// Returns `false` if there was nothing to delete.
    #[instrument(skip(self), err)]
    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool, Error> {
        let Some(current) = self.fetch(user_id, id).await? else {
            return Ok(false);
        };

        self.platform
            .delete_assistant(&current.platform_assistant_id)
            .await?;

        // dependent file, embed and scrape records go with the assistant
        current.delete(&self.db).await?;

        Ok(true)
    }

    pub(crate) async fn fetch(
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
