#[cfg(test)]
mod test;

use crate::{
    embed::model::{EmbedConfig, EmbedRequest, EmbedSummary, EmbedUpdate},
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
use vocero_entity::{assistant, embed_mapping};

#[derive(Clone, Debug)]
pub struct EmbedService {
    db: Database,
}

impl EmbedService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a new embed mapping with a generated public embed id.
    #[instrument(skip(self), err)]
    pub async fn create(
        &self,
        user_id: &str,
        request: EmbedRequest,
    ) -> Result<EmbedSummary, Error> {
        if self
            .fetch_assistant(user_id, request.assistant_id)
            .await?
            .is_none()
        {
            return Err(Error::NotFound);
        }

        let model = embed_mapping::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            embed_id: Set(Uuid::new_v4().simple().to_string()),
            assistant_id: Set(request.assistant_id),
            active: Set(true),
            created_at: Set(OffsetDateTime::now_utc()),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    pub async fn list(
        &self,
        user_id: &str,
        paginated: Paginated,
    ) -> Result<PaginatedResults<EmbedSummary>, Error> {
        let limiter = embed_mapping::Entity::find()
            .filter(embed_mapping::Column::UserId.eq(user_id))
            .order_by_desc(embed_mapping::Column::CreatedAt)
            .limiting(&self.db, paginated.offset, paginated.limit);

        let total = limiter.total().await?;

        Ok(PaginatedResults {
            total,
            items: limiter
                .fetch()
                .await?
                .into_iter()
                .map(EmbedSummary::from)
                .collect(),
        })
    }

    /// Repoint or toggle an embed mapping.
    #[instrument(skip(self), err)]
    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        update: EmbedUpdate,
    ) -> Result<EmbedSummary, Error> {
        let Some(current) = embed_mapping::Entity::find_by_id(id)
            .filter(embed_mapping::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Err(Error::NotFound);
        };

        let mut model = embed_mapping::ActiveModel {
            id: Unchanged(current.id),
            ..Default::default()
        };

        if let Some(assistant_id) = update.assistant_id {
            if self.fetch_assistant(user_id, assistant_id).await?.is_none() {
                return Err(Error::NotFound);
            }
            model.assistant_id = Set(assistant_id);
        }
        if let Some(active) = update.active {
            model.active = Set(active);
        }

        Ok(model.update(&self.db).await?.into())
    }

    /// Remove an embed mapping.
    ///
    /// Returns `false` if there was nothing to delete.
    #[instrument(skip(self), err)]
    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool, Error> {
        let Some(current) = embed_mapping::Entity::find_by_id(id)
            .filter(embed_mapping::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };

        current.delete(&self.db).await?;

        Ok(true)
    }

    /// Look up the widget configuration for a public embed id.
    ///
    /// Only active embeds of active assistants resolve.
    pub async fn config(&self, embed_id: &str) -> Result<Option<EmbedConfig>, Error> {
        let Some((_, Some(assistant))) = embed_mapping::Entity::find()
            .filter(embed_mapping::Column::EmbedId.eq(embed_id))
            .filter(embed_mapping::Column::Active.eq(true))
            .find_also_related(assistant::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if !assistant.active {
            return Ok(None);
        }

        Ok(Some(assistant.into()))
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
