use crate::{file::model::FileSummary, Error};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;
use vocero_common::{
    db::{limiter::LimiterTrait, Database},
    model::{Paginated, PaginatedResults},
};
use vocero_entity::{assistant, assistant_file};
use vocero_module_platform::PlatformClient;

#[derive(Clone, Debug)]
pub struct FileService {
    db: Database,
    platform: PlatformClient,
}

impl FileService {
    pub fn new(db: Database, platform: PlatformClient) -> Self {
        Self { db, platform }
    }

    /// Upload a knowledge file to the platform, attach it to the assistant, and record it.
    #[instrument(skip(self, content), err)]
    pub async fn upload(
        &self,
        user_id: &str,
        assistant_id: Uuid,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<FileSummary, Error> {
        if file_name.trim().is_empty() {
            return Err(Error::BadRequest("file name must not be empty".into()));
        }
        if content.is_empty() {
            return Err(Error::BadRequest("file must not be empty".into()));
        }

        let Some(assistant) = self.fetch_assistant(user_id, assistant_id).await? else {
            return Err(Error::NotFound);
        };

        let size = content.len() as i64;
        let file = self
            .platform
            .upload_file(file_name, content_type, content)
            .await?;

        // make the new knowledge file visible to the platform assistant
        let mut definition = self
            .platform
            .get_assistant(&assistant.platform_assistant_id)
            .await?
            .definition;
        definition.file_ids.push(file.id.clone());
        self.platform
            .update_assistant(&assistant.platform_assistant_id, &definition)
            .await?;

        let model = assistant_file::ActiveModel {
            id: Set(Uuid::new_v4()),
            assistant_id: Set(assistant.id),
            user_id: Set(user_id.to_string()),
            file_name: Set(file_name.to_string()),
            content_type: Set(content_type.to_string()),
            size: Set(size),
            platform_file_id: Set(file.id.clone()),
            processed: Set(file.is_processed()),
            created_at: Set(OffsetDateTime::now_utc()),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    pub async fn list(
        &self,
        user_id: &str,
        assistant_id: Uuid,
        paginated: Paginated,
    ) -> Result<PaginatedResults<FileSummary>, Error> {
        if self.fetch_assistant(user_id, assistant_id).await?.is_none() {
            return Err(Error::NotFound);
        }

        let limiter = assistant_file::Entity::find()
            .filter(assistant_file::Column::AssistantId.eq(assistant_id))
            .order_by_desc(assistant_file::Column::CreatedAt)
            .limiting(&self.db, paginated.offset, paginated.limit);

        let total = limiter.total().await?;

        Ok(PaginatedResults {
            total,
            items: limiter
                .fetch()
                .await?
                .into_iter()
                .map(FileSummary::from)
                .collect(),
        })
    }

    /// Remove a file from the platform and drop the record.
    ///
    /// Returns `false` if there was nothing to delete.
    #[instrument(skip(self), err)]
    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool, Error> {
        let Some(file) = assistant_file::Entity::find_by_id(id)
            .filter(assistant_file::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };

        // detach from the platform assistant before deleting the file itself
        if let Some(assistant) = assistant::Entity::find_by_id(file.assistant_id)
            .one(&self.db)
            .await?
        {
            let mut definition = self
                .platform
                .get_assistant(&assistant.platform_assistant_id)
                .await?
                .definition;
            definition
                .file_ids
                .retain(|file_id| file_id != &file.platform_file_id);
            self.platform
                .update_assistant(&assistant.platform_assistant_id, &definition)
                .await?;
        }

        self.platform.delete_file(&file.platform_file_id).await?;

        file.delete(&self.db).await?;

        Ok(true)
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
