//! Client for the external crawl provider.


use anyhow::Context;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use url::Url;

#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Crawl provider")]
#[group(id = "crawl")]
pub struct CrawlConfig {
    /// Base URL of the crawl provider API
    #[arg(
        id = "crawl-url",
        long,
        env = "CRAWL_URL",
        default_value = "https://api.webharvest.dev/"
    )]
    pub url: String,

    /// API token for the crawl provider
    #[arg(id = "crawl-token", long, env = "CRAWL_TOKEN")]
    pub token: Option<String>,

    /// Request timeout, in seconds
    #[arg(
        id = "crawl-timeout",
        long,
        env = "CRAWL_TIMEOUT",
        default_value_t = 30
    )]
    pub timeout: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to reach the crawl provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("crawl provider rejected the request ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
}

/// The job state as reported by the provider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Scraping,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlJob {
    pub job_id: String,
}

/// A single crawled page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlPage {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlState {
    pub status: JobStatus,
    #[serde(default)]
    pub pages: Vec<CrawlPage>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Client for the crawl provider.
///
/// Cheap to clone, all clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct CrawlClient {
    client: reqwest::Client,
    base: Url,
    token: String,
}

impl CrawlClient {
    pub fn new(config: &CrawlConfig) -> anyhow::Result<Self> {
        let mut base = Url::parse(&config.url)
            .with_context(|| format!("failed to parse crawl provider URL: {}", config.url))?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let token = config
            .token
            .clone()
            .context("no crawl provider token configured (use --crawl-token)")?;

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

    /// Submit a new crawl job for a site.
    #[instrument(skip(self), err)]
    pub async fn start_crawl(&self, url: &str) -> Result<CrawlJob, Error> {
        let response = self
            .client
            .post(self.url("crawl"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

    /// Fetch the current state of a crawl job.
    #[instrument(skip(self), err)]
    pub async fn job_status(&self, job_id: &str) -> Result<CrawlState, Error> {
        let response = self
            .client
            .get(self.url(&format!("crawl/{job_id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Ok(Self::accepted(response).await?.json().await?)
    }

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
