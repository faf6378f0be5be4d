#![allow(clippy::expect_used)]

pub mod app;
pub mod call;

use postgresql_embedded::PostgreSQL;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use std::env;
use test_context::AsyncTestContext;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;
use vocero_common as common;
use vocero_common::db;
use vocero_entity::assistant;

#[allow(dead_code)]
pub struct VoceroContext {
    pub db: common::db::Database,
    postgresql: Option<PostgreSQL>,
}

impl VoceroContext {
    async fn new(db: common::db::Database, postgresql: impl Into<Option<PostgreSQL>>) -> Self {
        Self {
            db,
            postgresql: postgresql.into(),
        }
    }

    /// Insert an assistant row for a user, returning the created model.
    ///
    /// Most endpoint tests need an assistant to hang other records off of; this creates one
    /// without going through the voice platform.
    pub async fn seed_assistant(
        &self,
        user_id: &str,
        name: &str,
        platform_assistant_id: &str,
    ) -> Result<assistant::Model, anyhow::Error> {
        let now = OffsetDateTime::now_utc();

        Ok(assistant::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            platform_assistant_id: Set(platform_assistant_id.to_string()),
            name: Set(name.to_string()),
            welcome_message: Set("Hi, how can I help?".to_string()),
            system_prompt: Set("You are a helpful assistant.".to_string()),
            language: Set("en".to_string()),
            voice_id: Set("nova".to_string()),
            position: Set("bottom-right".to_string()),
            theme: Set("light".to_string()),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?)
    }
}

impl AsyncTestContext for VoceroContext {
    #[instrument]
    #[allow(clippy::expect_used)]
    async fn setup() -> VoceroContext {
        if env::var("EXTERNAL_TEST_DB").is_ok() {
            log::warn!("Using external database from 'DB_*' env vars");
            let config = common::config::Database::from_env().expect("DB config from env");

            let db = if env::var("EXTERNAL_TEST_DB_BOOTSTRAP").is_ok() {
                common::db::Database::bootstrap(&config).await
            } else {
                common::db::Database::new(&config).await
            }
            .expect("Configuring the database");

            return VoceroContext::new(db, None).await;
        }

        let (db, postgresql) = db::embedded::create()
            .await
            .expect("Create an embedded database");

        VoceroContext::new(db, postgresql).await
    }
}
