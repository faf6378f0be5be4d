#[cfg(test)]
mod test;

use crate::{
    config::PlatformConfig,
    model::{
        AssistantDefinition, CallRequest, PlatformAssistant, PlatformCall, PlatformFile,
        PlatformTool, ToolDefinition,
    },
};
use anyhow::Context;
use reqwest::{multipart, Response, StatusCode};
use std::time::Duration;
use tracing::instrument;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to reach the voice platform: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("voice platform rejected the request ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
}

/// Client for the external voice platform.
///
/// Cheap to clone, all clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct PlatformClient {
    client: reqwest::Client,
    base: Url,
    token: String,
}

impl PlatformClient {
    pub fn new(config: &PlatformConfig) -> anyhow::Result<Self> {
        let mut base = Url::parse(&config.url)
            .with_context(|| format!("failed to parse platform URL: {}", config.url))?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let token = config
            .token
            .clone()
            .context("no platform token configured (use --platform-token)")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("failed to build the HTTP client")?;

        Ok(Self {
            client,
            base,
            token,
        })
    }

    fn url(&self, path: &str) -> Url {
        // the base is guaranteed to end with a slash, so join never replaces the last segment
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }

    #[instrument(skip(self, definition), err)]
    pub async fn create_assistant(
        &self,
        definition: &AssistantDefinition,
    ) -> Result<PlatformAssistant, Error> {
        let response = self
            .client
            .post(self.url("assistant"))
            .bearer_auth(&self.token)
            .json(definition)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    #[instrument(skip(self, definition), err)]
    pub async fn update_assistant(
        &self,
        id: &str,
        definition: &AssistantDefinition,
    ) -> Result<PlatformAssistant, Error> {
        let response = self
            .client
            .patch(self.url(&format!("assistant/{id}")))
            .bearer_auth(&self.token)
            .json(definition)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn get_assistant(&self, id: &str) -> Result<PlatformAssistant, Error> {
        let response = self
            .client
            .get(self.url(&format!("assistant/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_assistant(&self, id: &str) -> Result<(), Error> {
        let response = self
            .client
            .delete(self.url(&format!("assistant/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        // a missing assistant counts as deleted
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::accepted(response).await?;
        Ok(())
    }

    #[instrument(skip(self, content), err)]
    pub async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<PlatformFile, Error> {
        let part = multipart::Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("file"))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_file(&self, id: &str) -> Result<(), Error> {
        let response = self
            .client
            .delete(self.url(&format!("file/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::accepted(response).await?;
        Ok(())
    }

    #[instrument(skip(self, definition), err)]
    pub async fn create_tool(&self, definition: &ToolDefinition) -> Result<PlatformTool, Error> {
        let response = self
            .client
            .post(self.url("tool"))
            .bearer_auth(&self.token)
            .json(definition)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_tool(&self, id: &str) -> Result<(), Error> {
        let response = self
            .client
            .delete(self.url(&format!("tool/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::accepted(response).await?;
        Ok(())
    }

    #[instrument(skip(self, request), err)]
    pub async fn start_call(&self, request: &CallRequest) -> Result<PlatformCall, Error> {
        let response = self
            .client
            .post(self.url("call"))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn stop_call(&self, id: &str) -> Result<PlatformCall, Error> {
        let response = self
            .client
            .post(self.url(&format!("call/{id}/stop")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    /// Turn a non-success response into an [`Error::Upstream`], carrying over the `message`
    /// field of the error body when there is one.
    async fn accepted(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(|message| message.as_str())
                .unwrap_or_default()
                .to_string(),
            Err(_) => String::new(),
        };

        Err(Error::Upstream { status, message })
    }
}
