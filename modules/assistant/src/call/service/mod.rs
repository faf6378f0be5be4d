use crate::{call::model::StartCallRequest, Error};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::instrument;
use vocero_common::db::Database;
use vocero_entity::assistant;
use vocero_module_platform::{
    model::{CallRequest, PlatformCall},
    PlatformClient,
};

#[derive(Clone, Debug)]
pub struct CallService {
    db: Database,
    platform: PlatformClient,
}

impl CallService {
    pub fn new(db: Database, platform: PlatformClient) -> Self {
        Self { db, platform }
    }

    /// Start a call session for one of the caller's assistants.
    #[instrument(skip(self, request), err)]
    pub async fn start(
        &self,
        user_id: &str,
        request: StartCallRequest,
    ) -> Result<PlatformCall, Error> {
        let Some(assistant) = assistant::Entity::find_by_id(request.assistant_id)
            .filter(assistant::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Err(Error::NotFound);
        };

        if !assistant.active {
            return Err(Error::BadRequest("assistant is not active".into()));
        }

        let call = self
            .platform
            .start_call(&CallRequest {
                assistant_id: assistant.platform_assistant_id,
                metadata: request.metadata,
            })
            .await?;

        log::info!("call started: {} ({})", call.id, assistant.id);

        Ok(call)
    }

    /// Stop a running call session.
    ///
    /// Call sessions live on the platform only, so the id passes through as-is.
    #[instrument(skip(self), err)]
    pub async fn stop(&self, call_id: &str) -> Result<PlatformCall, Error> {
        Ok(self.platform.stop_call(call_id).await?)
    }
}
